//! Program layout handed to the backend
//!
//! A program is a top-level instruction stream plus any number of
//! subroutines. Each stream is a separate compilation unit for register
//! allocation.

use serde::{Deserialize, Serialize};
use snap_codegen::{emit_listing, AsmInst};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub top_level: Vec<AsmInst>,
    #[serde(default)]
    pub subroutines: Vec<Subroutine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subroutine {
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<AsmInst>,
}

impl Program {
    /// Every compilation unit with a display name, top level first
    pub fn units(&self) -> impl Iterator<Item = (&str, &[AsmInst])> {
        std::iter::once(("<top level>", self.top_level.as_slice())).chain(
            self.subroutines
                .iter()
                .map(|sub| (sub.name.as_str(), sub.instructions.as_slice())),
        )
    }

    /// Assembly listing of the whole program. Each subroutine is introduced
    /// by its name as a label.
    pub fn listing(&self) -> String {
        let mut out = emit_listing(&self.top_level);
        for sub in &self.subroutines {
            out.push_str(&format!("{}:\n", sub.name));
            out.push_str(&emit_listing(&sub.instructions));
        }
        out
    }
}
