//! The target record and its partial-merge patch

use serde::{Deserialize, Serialize};

/// Name portion of the target record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// First name
    #[serde(default)]
    pub first: String,

    /// Last name
    #[serde(default)]
    pub last: String,
}

/// Address portion of the target record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Street address, line one
    #[serde(default)]
    pub address01: String,

    /// Street address, line two (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address02: Option<String>,

    /// City
    #[serde(default)]
    pub city: String,

    /// State
    #[serde(default)]
    pub state: String,

    /// Zip code
    #[serde(default)]
    pub zipcode: String,
}

/// The structured record the system attempts to auto-populate.
///
/// All fields default to the empty string except `address02`, which defaults
/// to absent. The record is never replaced wholesale; it is only mutated
/// field-by-field via [`TargetRecord::apply_patch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Name fields
    #[serde(default)]
    pub name: NameRecord,

    /// Address fields
    #[serde(default)]
    pub address: AddressRecord,
}

/// Partial view of [`NameRecord`]: absent keys leave existing values untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamePatch {
    /// First name, if present in the response
    pub first: Option<String>,

    /// Last name, if present in the response
    pub last: Option<String>,
}

/// Partial view of [`AddressRecord`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPatch {
    /// Street address line one, if present
    pub address01: Option<String>,

    /// Street address line two, if present
    pub address02: Option<String>,

    /// City, if present
    pub city: Option<String>,

    /// State, if present
    pub state: Option<String>,

    /// Zip code, if present
    pub zipcode: Option<String>,
}

/// Partial view of the whole record, as returned in the `values` key of the
/// model response. Unrecognized keys are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPatch {
    /// Name fields, if any were extracted
    pub name: Option<NamePatch>,

    /// Address fields, if any were extracted
    pub address: Option<AddressPatch>,
}

impl NameRecord {
    fn apply(&mut self, patch: &NamePatch) {
        if let Some(first) = &patch.first {
            self.first = first.clone();
        }
        if let Some(last) = &patch.last {
            self.last = last.clone();
        }
    }
}

impl AddressRecord {
    fn apply(&mut self, patch: &AddressPatch) {
        if let Some(address01) = &patch.address01 {
            self.address01 = address01.clone();
        }
        if let Some(address02) = &patch.address02 {
            self.address02 = Some(address02.clone());
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(state) = &patch.state {
            self.state = state.clone();
        }
        if let Some(zipcode) = &patch.zipcode {
            self.zipcode = zipcode.clone();
        }
    }
}

impl TargetRecord {
    /// Merge a patch into the record field-by-field.
    ///
    /// Present keys overwrite, including overwriting with an empty string if
    /// the model returned one. Absent keys leave existing values untouched.
    pub fn apply_patch(&mut self, patch: &RecordPatch) {
        if let Some(name) = &patch.name {
            self.name.apply(name);
        }
        if let Some(address) = &patch.address {
            self.address.apply(address);
        }
    }

    /// Names of required fields that are still empty.
    ///
    /// `address02` is optional and never reported here.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.first.is_empty() {
            missing.push("name.first");
        }
        if self.name.last.is_empty() {
            missing.push("name.last");
        }
        if self.address.address01.is_empty() {
            missing.push("address.address01");
        }
        if self.address.city.is_empty() {
            missing.push("address.city");
        }
        if self.address.state.is_empty() {
            missing.push("address.state");
        }
        if self.address.zipcode.is_empty() {
            missing.push("address.zipcode");
        }
        missing
    }

    /// True when every required field is non-empty.
    pub fn required_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}
