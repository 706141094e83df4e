//! Exercise endpoints

use super::dto::{Exercise, ExerciseListResponse, ExerciseType, ExerciseTypeListResponse, NewExercise};
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport};

pub struct ExerciseApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ExerciseApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn types(&self) -> ClientResult<Vec<ExerciseType>> {
        let response: ExerciseTypeListResponse = self
            .client
            .request("/exercises/types", RequestOptions::get())
            .await?;
        Ok(response.types)
    }

    pub async fn create(&self, exercise: &NewExercise) -> ClientResult<serde_json::Value> {
        self.client
            .request("/exercises", RequestOptions::post_json(exercise)?)
            .await
    }

    pub async fn list(&self) -> ClientResult<Vec<Exercise>> {
        let response: ExerciseListResponse =
            self.client.request("/exercises", RequestOptions::get()).await?;
        Ok(response.exercises)
    }
}
