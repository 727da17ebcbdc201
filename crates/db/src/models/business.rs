use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Read an explicit `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opening hours for a single weekday
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
}

impl DayHours {
    pub fn open(open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            is_open: true,
            open_time: Some(open_time.into()),
            close_time: Some(close_time.into()),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}

/// Weekly opening hours, one entry per weekday.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(default)]
pub struct BusinessHours {
    #[serde(deserialize_with = "null_as_default")]
    pub monday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub tuesday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub wednesday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub thursday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub friday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub saturday: DayHours,
    #[serde(deserialize_with = "null_as_default")]
    pub sunday: DayHours,
}

impl BusinessHours {
    /// Same hours on every day of the week.
    pub fn uniform(day: DayHours) -> Self {
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day.clone(),
            saturday: day.clone(),
            sunday: day,
        }
    }

    /// Weekdays in calendar order, Monday first.
    pub fn days(&self) -> [(&'static str, &DayHours); 7] {
        [
            ("Monday", &self.monday),
            ("Tuesday", &self.tuesday),
            ("Wednesday", &self.wednesday),
            ("Thursday", &self.thursday),
            ("Friday", &self.friday),
            ("Saturday", &self.saturday),
            ("Sunday", &self.sunday),
        ]
    }
}

/// Everything the owner tells us about their business.
///
/// Missing and `null` fields deserialize to their empty value so that the
/// HTTP layer can report which required field is absent instead of a generic
/// body error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hours: BusinessHours,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sections: Vec<String>,
}

impl BusinessData {
    /// The website, if one was given and is not blank.
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().map(str::trim).filter(|w| !w.is_empty())
    }
}
