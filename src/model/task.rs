use chrono::NaiveDateTime;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated attribute attached to a task (e.g. "left for field").
///
/// The attribute may be present with a null value; only a present value
/// produces a marker glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerAttribute {
    pub value: Option<NaiveDateTime>,
}

/// A single schedule item as read by the layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Step-type key; only bars of the same category may share a lane.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub marker: Option<MarkerAttribute>,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub custom_class: Option<String>,
    #[serde(default, with = "hex_color_opt")]
    pub color: Option<Color32>,
    /// Horizontal room reserved after the bar for an outside label.
    #[serde(default)]
    pub label_width: f32,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            category: category.into(),
            marker: None,
            invalid: false,
            custom_class: None,
            color: None,
            label_width: 0.0,
        }
    }

    /// Create a zero-duration task (rendered as a point).
    pub fn new_point(
        name: impl Into<String>,
        category: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self::new(name, category, at, at)
    }

    pub fn with_marker(mut self, value: Option<NaiveDateTime>) -> Self {
        self.marker = Some(MarkerAttribute { value });
        self
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// The marker date, if the attribute exists and carries a value.
    pub fn marker_date(&self) -> Option<NaiveDateTime> {
        self.marker.as_ref().and_then(|m| m.value)
    }
}

/// Serde helper for `Option<Color32>` stored as `#RRGGBB` / `#RRGGBBAA`.
mod hex_color_opt {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            None => serializer.serialize_none(),
            Some(c) => {
                let [r, g, b, a] = c.to_array();
                if a == 255 {
                    serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}", r, g, b))
                } else {
                    serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a))
                }
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_hex_color(&s).map(Some).map_err(serde::de::Error::custom),
        }
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .ok_or_else(|| format!("Invalid hex color '{}'", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!("Invalid hex color '{}': expected 6 or 8 hex digits", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_task_with_defaults() {
        let json = r##"{
            "name": "Load trucks",
            "start": "2024-05-01T08:00:00",
            "end": "2024-05-02T08:00:00",
            "color": "#3366CC"
        }"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.category, "");
        assert!(!task.invalid);
        assert_eq!(task.label_width, 0.0);
        assert_eq!(task.color, Some(Color32::from_rgb(0x33, 0x66, 0xCC)));
        assert_eq!(task.marker_date(), None);
    }

    #[test]
    fn null_marker_value_has_no_date() {
        let json = r#"{
            "name": "Survey",
            "start": "2024-05-01T00:00:00",
            "end": "2024-05-01T00:00:00",
            "marker": { "value": null }
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.marker.is_some());
        assert_eq!(task.marker_date(), None);
        assert!(task.is_point());
    }

    #[test]
    fn rejects_malformed_colour() {
        let json = r##"{
            "name": "x",
            "start": "2024-05-01T00:00:00",
            "end": "2024-05-01T00:00:00",
            "color": "#12"
        }"##;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
