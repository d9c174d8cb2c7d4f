//! Problem reports: a described household issue, optionally with a photo
//! that is sent for AI analysis before the report is handed on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ImageHandle, MessageTransport};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemError {
    #[error("Please describe the problem.")]
    EmptyDescription,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown urgency '{0}'")]
    UnknownUrgency(String),
}

/// Trade the problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    Hvac,
    Appliance,
    Handyman,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Hvac,
        ServiceCategory::Appliance,
        ServiceCategory::Handyman,
        ServiceCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Hvac => "hvac",
            ServiceCategory::Appliance => "appliance",
            ServiceCategory::Handyman => "handyman",
            ServiceCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Electrical => "Electrical",
            ServiceCategory::Hvac => "HVAC",
            ServiceCategory::Appliance => "Appliance",
            ServiceCategory::Handyman => "General",
            ServiceCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ServiceCategory {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == needle)
            .ok_or_else(|| ProblemError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn description(self) -> &'static str {
        match self {
            Urgency::Low => "Can wait a few days",
            Urgency::Medium => "Within 24 hours",
            Urgency::High => "Emergency/ASAP",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        })
    }
}

impl FromStr for Urgency {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(ProblemError::UnknownUrgency(s.to_string())),
        }
    }
}

/// A problem the user wants fixed.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemReport {
    pub description: String,
    pub category: ServiceCategory,
    pub urgency: Urgency,
    pub location: String,
    #[serde(skip)]
    pub image: Option<ImageHandle>,
    pub submitted_at: DateTime<Utc>,
    pub ai_analysis: Option<String>,
}

impl ProblemReport {
    pub fn new(
        description: &str,
        category: ServiceCategory,
        urgency: Urgency,
        location: &str,
    ) -> Result<Self, ProblemError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ProblemError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            category,
            urgency,
            location: location.trim().to_string(),
            image: None,
            submitted_at: Utc::now(),
            ai_analysis: None,
        })
    }

    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    /// Text sent with the photo so the analysis sees what the user reported.
    pub fn analysis_prompt(&self) -> String {
        format!(
            "Problem description: {}. Category: {}. Urgency: {}. \
             Please analyze this image and provide diagnosis.",
            self.description, self.category, self.urgency
        )
    }
}

/// Attach an AI analysis of the report's photo, if it has one.
///
/// Analysis is best effort: any failure is logged and the report is
/// returned without an analysis.
pub async fn submit_problem(
    transport: &dyn MessageTransport,
    mut report: ProblemReport,
) -> ProblemReport {
    let Some(image) = report.image.clone() else {
        debug!(category = %report.category, "problem submitted without image");
        return report;
    };

    let bytes = match image.read().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(image = image.display_name(), "could not read problem image: {e}");
            return report;
        }
    };

    let prompt = report.analysis_prompt();
    match transport
        .post_image("", bytes, image.display_name(), Some(&prompt))
        .await
    {
        Ok(reply) => {
            report.ai_analysis = reply.reply.filter(|r| !r.is_empty());
            debug!(
                analyzed = report.ai_analysis.is_some(),
                "problem image analyzed"
            );
        }
        Err(e) => warn!("problem image analysis failed, continuing without it: {e}"),
    }
    report
}
