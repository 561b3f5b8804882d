//! Label table for a compilation unit
//!
//! Maps every label declared in an instruction stream to the stream index of
//! its declaration. A name may only be declared once per unit.

use snap_codegen::AsmInst;
use snap_common::CompilerError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: BTreeMap<String, usize>,
}

impl LabelTable {
    /// Collect the label declarations of `instructions`
    pub fn build(instructions: &[AsmInst]) -> Result<Self, CompilerError> {
        let mut labels = BTreeMap::new();
        for (index, inst) in instructions.iter().enumerate() {
            if let AsmInst::Label(name) = inst {
                if labels.insert(name.clone(), index).is_some() {
                    return Err(CompilerError::duplicate_label(name));
                }
            }
        }
        Ok(Self { labels })
    }

    /// Stream index of the declaration of `name`
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
