//! On-disk shape of the store file.
//!
//! ```json
//! {
//!   "patients": { "<patient_id>": { ...patient... }, ... },
//!   "events":   [ { "type": "...", "patient_id": "...", ... }, ... ]
//! }
//! ```
//!
//! `patients` is a JSON object, but listing order matters, so it is held as
//! an ordered `Vec` and (de)serialized through `ordered_patients`, which
//! preserves the key order found in the file.

use serde::{Deserialize, Serialize};

use medibuddy_contracts::{event::Event, patient::Patient};

/// The whole persisted state of a `JsonStore`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default, with = "ordered_patients")]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl StoreDocument {
    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.patient_id == patient_id)
    }

    /// Replace the patient sharing `patient.patient_id` in place, or append
    /// it. Returns `true` when an existing record was replaced.
    pub fn upsert(&mut self, patient: Patient) -> bool {
        match self
            .patients
            .iter_mut()
            .find(|p| p.patient_id == patient.patient_id)
        {
            Some(slot) => {
                *slot = patient;
                true
            }
            None => {
                self.patients.push(patient);
                false
            }
        }
    }
}

/// Serialize `Vec<Patient>` as an id-keyed JSON object in vector order, and
/// read it back in file order.
mod ordered_patients {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use medibuddy_contracts::patient::Patient;

    pub fn serialize<S: Serializer>(patients: &[Patient], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(patients.len()))?;
        for patient in patients {
            map.serialize_entry(&patient.patient_id, patient)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Patient>, D::Error> {
        deserializer.deserialize_map(PatientMapVisitor)
    }

    struct PatientMapVisitor;

    impl<'de> Visitor<'de> for PatientMapVisitor {
        type Value = Vec<Patient>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of patient_id to patient record")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut patients: Vec<Patient> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, mut patient)) = access.next_entry::<String, Patient>()? {
                // The key is authoritative for lookups.
                patient.patient_id = key;
                match patients.iter_mut().find(|p| p.patient_id == patient.patient_id) {
                    Some(slot) => *slot = patient,
                    None => patients.push(patient),
                }
            }
            Ok(patients)
        }
    }
}
