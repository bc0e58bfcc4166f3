//! Parser for binding files (`.binds` / `.xml`).
//!
//! Every direct child of the root element is one bindable control. Its tag is
//! the control code, and optional `Primary` / `Secondary` children carry the
//! `Device` and `Key` assigned to each slot.

use super::document::{DocumentNode, XmlElement};
use crate::error::Result;
use std::fmt;
use std::fs;
use std::path::Path;

/// Placeholder device used by the game for a slot with nothing assigned.
pub const UNBOUND_SENTINEL: &str = "{NoDevice}";

/// One input slot of a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRef {
    /// Assigned device, `None` when the slot is unbound.
    pub device: Option<String>,
    pub key: String,
}

impl InputRef {
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn bound(device: &str, key: &str) -> Self {
        Self {
            device: Some(device.to_string()),
            key: key.to_string(),
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.device.is_none()
    }

    /// Read a `Primary`/`Secondary` element. A missing element or `Device`
    /// attribute, or the sentinel device itself, means unbound.
    fn from_node<N: DocumentNode>(node: Option<&N>) -> Self {
        let Some(node) = node else {
            return Self::unbound();
        };
        let device = node
            .attribute("Device")
            .filter(|d| *d != UNBOUND_SENTINEL)
            .map(str::to_string);
        let key = node.attribute("Key").unwrap_or_default().to_string();
        Self { device, key }
    }
}

impl fmt::Display for InputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = self.device.as_deref().unwrap_or(UNBOUND_SENTINEL);
        write!(f, "{} - {}", device, self.key)
    }
}

/// A parsed, unmapped control binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBinding {
    pub code: String,
    pub primary: InputRef,
    pub secondary: InputRef,
}

impl RawBinding {
    pub fn new(code: &str, primary: InputRef, secondary: InputRef) -> Self {
        Self {
            code: code.to_string(),
            primary,
            secondary,
        }
    }

    pub fn primary_display(&self) -> String {
        self.primary.to_string()
    }

    pub fn secondary_display(&self) -> String {
        self.secondary.to_string()
    }
}

/// Parse a binding file from disk.
pub fn parse_bindings(path: &Path) -> Result<Vec<RawBinding>> {
    let content = fs::read_to_string(path)?;
    let bindings = parse_bindings_str(&content)?;
    tracing::debug!(count = bindings.len(), path = %path.display(), "parsed binding file");
    Ok(bindings)
}

/// Parse binding file content from a string.
pub fn parse_bindings_str(content: &str) -> Result<Vec<RawBinding>> {
    let root = XmlElement::parse_str(content)?;
    Ok(bindings_from_document(&root))
}

/// Extract one [`RawBinding`] per direct child of `root`, in document order.
pub fn bindings_from_document<N: DocumentNode>(root: &N) -> Vec<RawBinding> {
    root.children()
        .map(|control| RawBinding {
            code: control.name().to_string(),
            primary: InputRef::from_node(control.child("Primary")),
            secondary: InputRef::from_node(control.child("Secondary")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<Root PresetName="Custom" MajorVersion="4" MinorVersion="0">
    <KeyboardLayout>en-US</KeyboardLayout>
    <MouseXMode Value="" />
    <YawLeftButton>
        <Primary Device="Keyboard" Key="Key_A" />
        <Secondary Device="{NoDevice}" Key="" />
    </YawLeftButton>
    <LandingGearToggle>
        <Primary Device="Keyboard" Key="L" />
    </LandingGearToggle>
    <HyperSuperCombination>
        <Primary Device="{NoDevice}" Key="" />
        <Secondary Device="ThrustMasterHOTAS4" Key="Joy_3">
            <Modifier Device="Keyboard" Key="Key_LeftShift" />
        </Secondary>
    </HyperSuperCombination>
</Root>
"#;

    #[test]
    fn test_one_binding_per_direct_child() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        assert_eq!(bindings.len(), 5);
    }

    #[test]
    fn test_preserves_document_order() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        let codes: Vec<_> = bindings.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(
            codes,
            [
                "KeyboardLayout",
                "MouseXMode",
                "YawLeftButton",
                "LandingGearToggle",
                "HyperSuperCombination"
            ]
        );
    }

    #[test]
    fn test_bound_and_sentinel_slots() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        let yaw = &bindings[2];
        assert_eq!(yaw.primary, InputRef::bound("Keyboard", "Key_A"));
        assert!(yaw.secondary.is_unbound());
        assert_eq!(yaw.primary_display(), "Keyboard - Key_A");
        assert_eq!(yaw.secondary_display(), "{NoDevice} - ");
    }

    #[test]
    fn test_missing_secondary_is_unbound() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        let gear = &bindings[3];
        assert_eq!(gear.primary_display(), "Keyboard - L");
        assert_eq!(gear.secondary_display(), "{NoDevice} - ");
    }

    #[test]
    fn test_element_without_slots_is_fully_unbound() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        let mouse = &bindings[1];
        assert!(mouse.primary.is_unbound());
        assert!(mouse.secondary.is_unbound());
        assert_eq!(mouse.primary_display(), "{NoDevice} - ");
        assert_eq!(mouse.secondary_display(), "{NoDevice} - ");
    }

    #[test]
    fn test_modifiers_do_not_change_slot() {
        let bindings = parse_bindings_str(SAMPLE).unwrap();
        let combo = &bindings[4];
        assert_eq!(combo.secondary_display(), "ThrustMasterHOTAS4 - Joy_3");
    }

    #[test]
    fn test_missing_attributes() {
        let bindings = parse_bindings_str(
            r#"<Root><A><Primary Key="Key_X" /><Secondary Device="Mouse" /></A></Root>"#,
        )
        .unwrap();
        assert_eq!(bindings[0].primary_display(), "{NoDevice} - Key_X");
        assert!(bindings[0].primary.is_unbound());
        assert_eq!(bindings[0].secondary_display(), "Mouse - ");
        assert!(!bindings[0].secondary.is_unbound());
    }

    #[test]
    fn test_empty_root_has_no_bindings() {
        assert!(parse_bindings_str("<Root/>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = parse_bindings_str("<Root><A></Root>").unwrap_err();
        assert!(matches!(err, ViewerError::Parse { .. }));
    }

    #[test]
    fn test_parse_bindings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Custom.4.0.binds");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(parse_bindings(&path).unwrap().len(), 5);

        let missing = parse_bindings(&dir.path().join("missing.binds")).unwrap_err();
        assert!(matches!(missing, ViewerError::Io(_)));
    }
}
