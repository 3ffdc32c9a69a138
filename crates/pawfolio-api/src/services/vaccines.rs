//! Vaccine schedule per pet

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{CreateVaccineRequest, GroupedVaccines, VaccineRecord};
use crate::Result;

impl ApiClient {
    /// Vaccines grouped by type, with dose history and next due date
    pub async fn list_vaccines(&self, pet_id: i64) -> Result<GroupedVaccines> {
        let request = self.request(Method::GET, &format!("/api/pets/{pet_id}/vaccines"));
        self.execute(request).await
    }

    pub async fn add_vaccine(
        &self,
        pet_id: i64,
        data: &CreateVaccineRequest,
    ) -> Result<VaccineRecord> {
        let request = self
            .request(Method::POST, &format!("/api/pets/{pet_id}/vaccines"))
            .json(data);
        self.execute(request).await
    }

    pub async fn delete_vaccine(&self, pet_id: i64, vaccine_id: i64) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &format!("/api/pets/{pet_id}/vaccines/{vaccine_id}"),
        );
        self.execute_empty(request).await
    }
}
