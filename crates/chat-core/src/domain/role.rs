//! System role presets offered before the first exchange

use serde::Serialize;

/// A selectable instruction text and its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePreset {
    pub label: &'static str,
    pub instruction: &'static str,
}

const ASSISTANT: RolePreset = RolePreset {
    label: "Assistant",
    instruction: "You are a helpful assistant. You help the user to find the information they need.\n\
If the user type a question, you answer it.\n",
};

const TRANSLATOR: RolePreset = RolePreset {
    label: "Traducteur Anglais-Français",
    instruction: "You are an interpreter. You translate from English to French and from French to English.\n\
If the user type a French text, you translate it into English.\n\
If the user type an English text, you translate it into French.\n\
If the text contains only one to three words, give some examples of usage of these words in English.\n",
};

const TRAVEL_GUIDE: RolePreset = RolePreset {
    label: "Guide touristique",
    instruction: "Your are a travel guide. If the user type the name of a country or of a town,\n\
you tell them what are the main places to visit in the country or the town\n\
are you tell them the average price of a meal.\n",
};

/// Fixed, ordered catalog. The first entry is the default selection.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    presets: Vec<RolePreset>,
}

impl RoleCatalog {
    pub fn builtin() -> Self {
        Self {
            presets: vec![ASSISTANT, TRANSLATOR, TRAVEL_GUIDE],
        }
    }

    pub fn presets(&self) -> &[RolePreset] {
        &self.presets
    }

    pub fn default_preset(&self) -> &RolePreset {
        &self.presets[0]
    }

    pub fn default_role(&self) -> &'static str {
        self.default_preset().instruction
    }

    pub fn find_by_label(&self, label: &str) -> Option<&RolePreset> {
        self.presets.iter().find(|p| p.label == label)
    }

    pub fn find_by_instruction(&self, instruction: &str) -> Option<&RolePreset> {
        self.presets.iter().find(|p| p.instruction == instruction)
    }

    /// Map a preset label to its instruction; anything else is used verbatim.
    pub fn resolve(&self, label_or_text: &str) -> String {
        self.find_by_label(label_or_text)
            .map(|p| p.instruction.to_string())
            .unwrap_or_else(|| label_or_text.to_string())
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
