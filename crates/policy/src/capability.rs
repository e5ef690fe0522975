use serde::{Deserialize, Serialize};

use crate::Module;

/// One of the five guarded actions available per module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityAction {
    View,
    Create,
    Edit,
    Delete,
    Export,
}

impl CapabilityAction {
    pub const ALL: [CapabilityAction; 5] = [
        CapabilityAction::View,
        CapabilityAction::Create,
        CapabilityAction::Edit,
        CapabilityAction::Delete,
        CapabilityAction::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityAction::View => "view",
            CapabilityAction::Create => "create",
            CapabilityAction::Edit => "edit",
            CapabilityAction::Delete => "delete",
            CapabilityAction::Export => "export",
        }
    }

    /// Parse an action name. Unknown names yield `None` (deny).
    pub fn from_name(name: &str) -> Option<CapabilityAction> {
        CapabilityAction::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == name)
    }
}

impl core::fmt::Display for CapabilityAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-module capability flags.
///
/// Invariant: a capability list carries at most one entry per module.
/// A module absent from a list is treated as all-false (see
/// [`capability_for`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCapability {
    pub module: Module,
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    pub export: bool,
}

impl ModuleCapability {
    pub fn new(
        module: Module,
        view: bool,
        create: bool,
        edit: bool,
        delete: bool,
        export: bool,
    ) -> Self {
        Self {
            module,
            view,
            create,
            edit,
            delete,
            export,
        }
    }

    /// All five actions granted.
    pub fn all(module: Module) -> Self {
        Self::new(module, true, true, true, true, true)
    }

    /// No action granted.
    pub fn none(module: Module) -> Self {
        Self::new(module, false, false, false, false, false)
    }

    /// View only.
    pub fn view_only(module: Module) -> Self {
        Self::new(module, true, false, false, false, false)
    }

    pub fn allows(&self, action: CapabilityAction) -> bool {
        match action {
            CapabilityAction::View => self.view,
            CapabilityAction::Create => self.create,
            CapabilityAction::Edit => self.edit,
            CapabilityAction::Delete => self.delete,
            CapabilityAction::Export => self.export,
        }
    }
}

/// Look up the capability entry for `module`, treating absence as all-false.
pub fn capability_for(capabilities: &[ModuleCapability], module: Module) -> ModuleCapability {
    capabilities
        .iter()
        .copied()
        .find(|c| c.module == module)
        .unwrap_or_else(|| ModuleCapability::none(module))
}
