use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/student", student_routes())
        .nest("/faculty", faculty_routes())
        .nest("/avatars", avatar_routes(config))
        .nest("/info", info_routes())
}

fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::student::list_students,
            handlers::student::create_student
        ))
        .routes(routes!(handlers::student::count_students))
        .routes(routes!(handlers::student::average_age))
        .routes(routes!(handlers::student::last_five))
        .routes(routes!(handlers::student::names_starting_with))
        .routes(routes!(
            handlers::student::get_student,
            handlers::student::update_student,
            handlers::student::delete_student
        ))
        .routes(routes!(handlers::student::get_student_faculty))
        .routes(routes!(handlers::student::get_avatar_from_db))
        .routes(routes!(handlers::student::get_avatar_from_fs))
}

fn faculty_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::faculty::list_faculties,
            handlers::faculty::create_faculty
        ))
        .routes(routes!(handlers::faculty::longest_faculty_name))
        .routes(routes!(
            handlers::faculty::get_faculty,
            handlers::faculty::update_faculty,
            handlers::faculty::delete_faculty
        ))
        .routes(routes!(handlers::faculty::list_faculty_students))
}

fn avatar_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::avatar::list_avatars,
            handlers::avatar::upload_avatar
        ))
        .layer(handlers::avatar::avatar_upload_body_limit(
            config.storage.max_avatar_size,
        ))
}

fn info_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::info::get_port))
}
