use serde::{Deserialize, Deserializer};

/// Field names are matched in lowercase; callers fold payload keys first.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "volunteeremails", deserialize_with = "volunteer_list")]
    pub volunteer_emails: Vec<VolunteerEmail>,
}

impl Team {
    pub fn volunteer_count(&self) -> usize {
        self.volunteer_emails.len()
    }
}

/// A volunteer assigned to a team. `team_id` points back at the owning team
/// and is usually absent from the payload.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VolunteerEmail {
    #[serde(rename = "teamid", alias = "team_id", deserialize_with = "null_as_default")]
    pub team_id: u64,
    #[serde(rename = "volunteeremail", deserialize_with = "null_as_default")]
    pub volunteer_email: String,
}

/// `null` leaves the field at its default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A `null` list is empty; `null` entries still count as volunteers.
fn volunteer_list<'de, D>(deserializer: D) -> Result<Vec<VolunteerEmail>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<VolunteerEmail>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}
