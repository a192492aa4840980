//! Per-server profile category
//!
//! Nickname and pronouns applied across a folder. Text fields: `Sentinel`
//! (checkbox ticked, input left empty) normalizes to an empty string, which
//! the provider treats as "clear the value".

use crate::builder::EditablePatch;
use crate::field::Field;
use crate::wire::{Normalize, WirePatch};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Sparse profile patch for one editing session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    /// Server nickname
    pub nick: Field<String>,
    /// Pronouns shown in this server
    pub pronouns: Field<String>,
}

/// One user edit to a [`ProfilePatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    /// Edit the nickname
    Nick(Field<String>),
    /// Edit the pronouns
    Pronouns(Field<String>),
}

impl EditablePatch for ProfilePatch {
    type Edit = ProfileEdit;

    fn apply_edit(&mut self, edit: ProfileEdit, _now: DateTime<Utc>) {
        match edit {
            ProfileEdit::Nick(field) => self.nick = field,
            ProfileEdit::Pronouns(field) => self.pronouns = field,
        }
    }
}

fn push_text(wire: &mut WirePatch, key: &str, field: &Field<String>) {
    match field {
        Field::Unset => {}
        Field::Sentinel => wire.insert(key, Value::String(String::new())),
        Field::Value(text) => wire.insert(key, Value::String(text.clone())),
    }
}

impl Normalize for ProfilePatch {
    fn normalize(&self) -> WirePatch {
        let mut wire = WirePatch::new();
        push_text(&mut wire, "nick", &self.nick);
        push_text(&mut wire, "pronouns", &self.pronouns);
        wire
    }
}
