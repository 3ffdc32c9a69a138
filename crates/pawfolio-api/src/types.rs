//! Wire types for the pet-care backend
//!
//! Field names follow the backend's camelCase JSON; enum values are the
//! backend's SCREAMING_SNAKE constants.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Cat,
    Dog,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetImage {
    pub id: i64,
    pub url: String,
    pub is_profile: bool,
    pub created_date: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub current_weight: Option<f64>,
    pub bio: Option<String>,
    pub neutered: bool,
    pub chip_number: Option<String>,
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub images: Vec<PetImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub species: Species,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub neutered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

/// Photo attached to a growth record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhoto {
    pub id: i64,
    pub url: String,
    pub created_date: DateTime<Utc>,
    pub description: Option<String>,
    #[serde(default)]
    pub profile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub weight: f64,
    pub pet_image: Option<GrowthPhoto>,
    pub notes: Option<String>,
    pub mood_score: Option<i32>,
    pub appetite_score: Option<i32>,
    #[serde(default)]
    pub ai_analyzed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrowthRecordRequest {
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appetite_score: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaccineType {
    CanineParasite,
    CanineRabies,
    CanineMixed,
    CanineBordetella,
    FelineParasite,
    FelineRabies,
    FelineMixed,
    FelineLeukemia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionSeverity {
    None,
    Mild,
    Severe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRecord {
    pub id: i64,
    pub administered_date: NaiveDate,
    pub vet_clinic_name: Option<String>,
    pub reaction_severity: Option<ReactionSeverity>,
    pub reaction_notes: Option<String>,
}

/// One vaccine type with its dose history and computed next due date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineGroup {
    pub vaccine_type: VaccineType,
    pub next_vaccine_date: Option<NaiveDate>,
    #[serde(default)]
    pub vaccine_history: Vec<VaccineRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedVaccines {
    #[serde(default)]
    pub vaccine_groups: Vec<VaccineGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaccineRequest {
    pub vaccine_type: VaccineType,
    pub administered_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vet_clinic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_severity: Option<ReactionSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: i64,
    pub user_message: String,
    pub ai_response: String,
    pub urgency_level: String,
    pub confidence_score: f64,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationSummary {
    pub id: i64,
    pub user_message: String,
    pub ai_response_preview: String,
    pub ai_response: Option<String>,
    pub urgency_level: String,
    pub confidence_score: f64,
    pub image_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationRequest {
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub is_expert: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
}
