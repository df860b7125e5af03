use serde::Serialize;

/// Number of reference link slots on the cover-letter form.
pub const REFERENCE_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flow {
    CoverLetter,
    Proposal,
}

impl Flow {
    pub const ALL: [Flow; 2] = [Flow::CoverLetter, Flow::Proposal];

    /// Path segment used by the browser surface.
    pub fn slug(self) -> &'static str {
        match self {
            Flow::CoverLetter => "cover-letter",
            Flow::Proposal => "proposal",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flow| flow.slug() == slug)
    }
}

/// Every editable input across both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    JobDescription,
    ApplicantName,
    Position,
    CompanyName,
    Reference(usize),
    FirstName,
    LastName,
    Email,
    CallLink,
}

impl Field {
    /// Input name as posted by the browser form. Matches the JSON wire name.
    pub fn key(self) -> String {
        match self {
            Field::JobDescription => "jobDescription".to_string(),
            Field::ApplicantName => "applicantName".to_string(),
            Field::Position => "position".to_string(),
            Field::CompanyName => "companyName".to_string(),
            Field::Reference(index) => format!("references.{index}"),
            Field::FirstName => "firstName".to_string(),
            Field::LastName => "lastName".to_string(),
            Field::Email => "email".to_string(),
            Field::CallLink => "callLink".to_string(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "jobDescription" => Field::JobDescription,
            "applicantName" => Field::ApplicantName,
            "position" => Field::Position,
            "companyName" => Field::CompanyName,
            "firstName" => Field::FirstName,
            "lastName" => Field::LastName,
            "email" => Field::Email,
            "callLink" => Field::CallLink,
            other => {
                let index = other.strip_prefix("references.")?.parse().ok()?;
                Field::Reference(index)
            }
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetterForm {
    pub job_description: String,
    pub applicant_name: String,
    pub position: String,
    pub company_name: String,
    pub references: Vec<String>,
}

impl Default for CoverLetterForm {
    fn default() -> Self {
        Self {
            job_description: String::new(),
            applicant_name: String::new(),
            position: String::new(),
            company_name: String::new(),
            references: vec![String::new(); REFERENCE_SLOTS],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProposalForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub call_link: String,
    pub job_description: String,
}

/// Local input state of one flow's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRecord {
    CoverLetter(CoverLetterForm),
    Proposal(ProposalForm),
}

impl FormRecord {
    pub fn empty(flow: Flow) -> Self {
        match flow {
            Flow::CoverLetter => FormRecord::CoverLetter(CoverLetterForm::default()),
            Flow::Proposal => FormRecord::Proposal(ProposalForm::default()),
        }
    }

    pub fn flow(&self) -> Flow {
        match self {
            FormRecord::CoverLetter(_) => Flow::CoverLetter,
            FormRecord::Proposal(_) => Flow::Proposal,
        }
    }

    /// Returns the record with `field` replaced by `value`.
    ///
    /// Values are kept verbatim. Fields that do not belong to this flow and
    /// reference indices outside the fixed slot list leave the record as is.
    pub fn with_field(self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        match self {
            FormRecord::CoverLetter(mut form) => {
                match field {
                    Field::JobDescription => form.job_description = value,
                    Field::ApplicantName => form.applicant_name = value,
                    Field::Position => form.position = value,
                    Field::CompanyName => form.company_name = value,
                    Field::Reference(index) => {
                        if let Some(slot) = form.references.get_mut(index) {
                            *slot = value;
                        }
                    }
                    Field::FirstName | Field::LastName | Field::Email | Field::CallLink => {}
                }
                FormRecord::CoverLetter(form)
            }
            FormRecord::Proposal(mut form) => {
                match field {
                    Field::FirstName => form.first_name = value,
                    Field::LastName => form.last_name = value,
                    Field::Email => form.email = value,
                    Field::CompanyName => form.company_name = value,
                    Field::CallLink => form.call_link = value,
                    Field::JobDescription => form.job_description = value,
                    Field::ApplicantName | Field::Position | Field::Reference(_) => {}
                }
                FormRecord::Proposal(form)
            }
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        let value = match (self, field) {
            (FormRecord::CoverLetter(form), Field::JobDescription) => &form.job_description,
            (FormRecord::CoverLetter(form), Field::ApplicantName) => &form.applicant_name,
            (FormRecord::CoverLetter(form), Field::Position) => &form.position,
            (FormRecord::CoverLetter(form), Field::CompanyName) => &form.company_name,
            (FormRecord::CoverLetter(form), Field::Reference(index)) => {
                form.references.get(index)?
            }
            (FormRecord::Proposal(form), Field::FirstName) => &form.first_name,
            (FormRecord::Proposal(form), Field::LastName) => &form.last_name,
            (FormRecord::Proposal(form), Field::Email) => &form.email,
            (FormRecord::Proposal(form), Field::CompanyName) => &form.company_name,
            (FormRecord::Proposal(form), Field::CallLink) => &form.call_link,
            (FormRecord::Proposal(form), Field::JobDescription) => &form.job_description,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Required fields are non-blank after trimming; a proposal also needs a
    /// call link or a job description.
    pub fn is_submittable(&self) -> bool {
        match self {
            FormRecord::CoverLetter(form) => [
                &form.job_description,
                &form.applicant_name,
                &form.position,
                &form.company_name,
            ]
            .into_iter()
            .all(|value| !is_blank(value)),
            FormRecord::Proposal(form) => {
                let required = [
                    &form.first_name,
                    &form.last_name,
                    &form.email,
                    &form.company_name,
                ]
                .into_iter()
                .all(|value| !is_blank(value));
                required && !(is_blank(&form.call_link) && is_blank(&form.job_description))
            }
        }
    }

    /// Builds the submission payload, dropping blank optional entries.
    pub fn cleaned(&self) -> CleanedRecord {
        match self {
            FormRecord::CoverLetter(form) => CleanedRecord::CoverLetter(CoverLetterRequest {
                job_description: form.job_description.clone(),
                applicant_name: form.applicant_name.clone(),
                position: form.position.clone(),
                company_name: form.company_name.clone(),
                references: form
                    .references
                    .iter()
                    .filter(|reference| !is_blank(reference))
                    .cloned()
                    .collect(),
            }),
            FormRecord::Proposal(form) => CleanedRecord::Proposal(ProposalRequest {
                first_name: form.first_name.clone(),
                last_name: form.last_name.clone(),
                email: form.email.clone(),
                company_name: form.company_name.clone(),
                call_link: non_blank(&form.call_link),
                job_description: non_blank(&form.job_description),
            }),
        }
    }
}

/// JSON body posted to the cover-letter webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub job_description: String,
    pub applicant_name: String,
    pub position: String,
    pub company_name: String,
    pub references: Vec<String>,
}

/// JSON body posted to the proposal webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

/// Submission payload, built once at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CleanedRecord {
    CoverLetter(CoverLetterRequest),
    Proposal(ProposalRequest),
}

impl CleanedRecord {
    pub fn flow(&self) -> Flow {
        match self {
            CleanedRecord::CoverLetter(_) => Flow::CoverLetter,
            CleanedRecord::Proposal(_) => Flow::Proposal,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.to_string())
    }
}
