use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct PortResponse {
    #[schema(example = 8080)]
    pub port: u16,
}
