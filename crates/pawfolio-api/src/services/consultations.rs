//! AI consultation history and requests

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{Consultation, ConsultationSummary, CreateConsultationRequest};
use crate::Result;

impl ApiClient {
    pub async fn list_consultations(&self, pet_id: i64) -> Result<Vec<ConsultationSummary>> {
        let request = self.request(Method::GET, &format!("/api/pets/{pet_id}/consultations"));
        self.execute(request).await
    }

    /// Submit a question (optionally with photos); the response carries
    /// the AI answer, urgency classification and confidence
    pub async fn create_consultation(
        &self,
        pet_id: i64,
        data: &CreateConsultationRequest,
    ) -> Result<Consultation> {
        let request = self
            .request(Method::POST, &format!("/api/pets/{pet_id}/consultations"))
            .json(data);
        self.execute(request).await
    }
}
