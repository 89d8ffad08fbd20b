//! OpenAPI description of the horse API. Title, description and version come from `Settings`.

use crate::config::Settings;
use crate::error::{ErrorBody, ErrorDetail, FieldError};
use crate::handlers::horses;
use crate::model::{Horse, HorsePatch, NewHorse, SortOrder};
use crate::response::HorseListResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(horses::list, horses::read, horses::create, horses::update, horses::delete),
    components(schemas(
        Horse,
        NewHorse,
        HorsePatch,
        HorseListResponse,
        SortOrder,
        ErrorBody,
        ErrorDetail,
        FieldError
    )),
    tags((name = "horses", description = "Manage spherical horses in a vacuum"))
)]
pub struct ApiDoc;

pub fn document(settings: &Settings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.app_title.clone();
    doc.info.description = Some(settings.app_description.clone());
    doc.info.version = settings.app_version.clone();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_comes_from_settings() {
        let settings = Settings {
            app_title: "Horses".into(),
            app_version: "9.9.9".into(),
            ..Settings::default()
        };
        let doc = serde_json::to_value(document(&settings)).unwrap();
        assert_eq!(doc["info"]["title"], "Horses");
        assert_eq!(doc["info"]["version"], "9.9.9");
        assert_eq!(
            doc["info"]["description"],
            "REST API for managing spherical horses in a vacuum"
        );
        assert!(doc["paths"]["/api/v1/horses/"]["get"].is_object());
        assert!(doc["paths"]["/api/v1/horses/{id}"]["delete"].is_object());
        assert!(doc["components"]["schemas"]["Horse"].is_object());
    }
}
