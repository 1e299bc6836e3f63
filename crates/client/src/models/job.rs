//! Software jobs and their parameters.

use serde::{Deserialize, Serialize};

use crate::resource::{Collection, Entity};

/// One execution of a software.
///
/// Parameters arrive embedded in the job object and are held as a typed
/// [`Collection`]; the same array is sent back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub software: Option<u64>,
    pub project: Option<u64>,
    pub status: Option<u64>,
    pub progress: Option<u64>,
    pub status_comment: Option<String>,
    #[serde(rename = "jobParameters")]
    pub parameters: Collection<JobParameter>,
}

impl Entity for Job {
    const RESOURCE: &'static str = "job";
    const FILTERS: &'static [&'static str] = &["project", "software"];
    const QUERY_PARAMS: &'static [&'static str] = &["light", "sort", "order"];
}

/// Value of one software parameter for a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobParameter {
    pub job: Option<u64>,
    pub software_parameter: Option<u64>,
    pub name: Option<String>,
    pub value: Option<String>,
}

impl JobParameter {
    pub fn new(job: u64, software_parameter: u64, value: impl Into<String>) -> Self {
        Self {
            job: Some(job),
            software_parameter: Some(software_parameter),
            value: Some(value.into()),
            name: None,
        }
    }
}

impl Entity for JobParameter {
    const RESOURCE: &'static str = "jobparameter";
    const FILTERS: &'static [&'static str] = &["job"];
    const UNFILTERED: bool = false;
}
