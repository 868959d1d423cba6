use crate::settings::Settings;

// Fixed per deployment; everything user-specific lives in the settings
// store instead.
pub const INSTITUTE: &str = "IIT Ropar";
pub const PROFESSOR: &str = "Prof. Sudarshan Iyengar";
pub const START_DATE: &str = "14-01-2026";
pub const END_DATE: &str = "24-03-2026";
pub const MODE_OF_INTERNSHIP: &str = "Virtual";
pub const DURATION: &str = "10 weeks";

#[derive(Debug, Clone)]
pub struct FieldFill {
    pub question: &'static str,
    pub value: String,
    pub date: bool,
}

impl FieldFill {
    fn text(question: &'static str, value: &str) -> Self {
        Self {
            question,
            value: value.to_string(),
            date: false,
        }
    }

    fn date(question: &'static str, value: &str) -> Self {
        Self {
            question,
            value: value.to_string(),
            date: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DropdownFill {
    pub question: &'static str,
    pub value: String,
}

/// The fixed set of question/value pairs one orchestrator tick applies.
#[derive(Debug, Clone)]
pub struct FillPlan {
    pub fields: Vec<FieldFill>,
    pub dropdowns: Vec<DropdownFill>,
}

impl FillPlan {
    pub fn build(settings: &Settings) -> Self {
        Self {
            fields: vec![
                // User-configured fields
                FieldFill::text("Internship ID", &settings.internship_id),
                FieldFill::text("Your Name", &settings.name),
                FieldFill::text("Mobile Number", &settings.mobile),
                // Fixed fields
                FieldFill::text("Institute offering", INSTITUTE),
                FieldFill::text("Internship offering Professor", PROFESSOR),
                FieldFill::date("Internship start date", START_DATE),
                FieldFill::date("Internship end date", END_DATE),
            ],
            dropdowns: vec![
                DropdownFill {
                    question: "Mode of Internship",
                    value: MODE_OF_INTERNSHIP.to_string(),
                },
                DropdownFill {
                    question: "Duration of Internship",
                    value: DURATION.to_string(),
                },
            ],
        }
    }
}
