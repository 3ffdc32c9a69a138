//! Pet profiles and growth records

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{CreateGrowthRecordRequest, CreatePetRequest, GrowthRecord, Pet};
use crate::Result;

impl ApiClient {
    /// Pets owned by the current user
    pub async fn list_pets(&self) -> Result<Vec<Pet>> {
        let request = self.request(Method::GET, "/api/pets");
        self.execute(request).await
    }

    pub async fn get_pet(&self, id: i64) -> Result<Pet> {
        let request = self.request(Method::GET, &format!("/api/pets/{id}"));
        self.execute(request).await
    }

    pub async fn create_pet(&self, data: &CreatePetRequest) -> Result<Pet> {
        let request = self.request(Method::POST, "/api/pets").json(data);
        self.execute(request).await
    }

    /// Growth history for a pet, newest first per backend ordering
    pub async fn growth_history(&self, pet_id: i64) -> Result<Vec<GrowthRecord>> {
        let request = self.request(Method::GET, &format!("/api/pets/{pet_id}/records"));
        self.execute(request).await
    }

    pub async fn add_growth_record(
        &self,
        pet_id: i64,
        data: &CreateGrowthRecordRequest,
    ) -> Result<GrowthRecord> {
        let request = self
            .request(Method::POST, &format!("/api/pets/{pet_id}/records"))
            .json(data);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Species;
    use pawfolio_auth::{SessionManager, TokenStore};
    use pawfolio_storage::Database;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_url: &str) -> ApiClient {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session =
            SessionManager::new(store, format!("{server_url}/api/auth/refresh"), "/login");
        ApiClient::new(server_url, session).unwrap()
    }

    #[tokio::test]
    async fn test_create_pet_posts_backend_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pets"))
            .and(body_partial_json(serde_json::json!({
                "name": "Rex",
                "species": "DOG",
                "neutered": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "name": "Rex",
                "species": "DOG",
                "neutered": false,
                "images": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let pet = client
            .create_pet(&CreatePetRequest {
                name: "Rex".to_string(),
                species: Species::Dog,
                breed: None,
                gender: None,
                birth_date: None,
                weight: None,
                bio: None,
                neutered: false,
                chip_number: None,
                image_urls: None,
            })
            .await
            .unwrap();

        assert_eq!(pet.id, 1);
        assert_eq!(pet.species, Species::Dog);
    }

    #[tokio::test]
    async fn test_growth_history_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pets/7/records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 3,
                "date": "2024-06-01",
                "weight": 4.5,
                "moodScore": 4
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let records = client.growth_history(7).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, 4.5);
        assert_eq!(records[0].mood_score, Some(4));
        assert!(!records[0].ai_analyzed);
    }
}
