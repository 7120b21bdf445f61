use axum::Json;

use crate::extract::BaseUrl;
use crate::serializers::ApiRoot;

#[utoipa::path(
    get, path = "/", tag = "root",
    responses((status = 200, description = "Links to the top-level collections", body = ApiRoot))
)]
pub async fn api_root(base: BaseUrl) -> Json<ApiRoot> {
    Json(ApiRoot { users: base.users(), snippets: base.snippets() })
}
