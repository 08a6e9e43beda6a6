use serde_json::json;

use crate::common::{TestApp, routes};

mod faculty_crud {
    use super::*;

    #[tokio::test]
    async fn create_get_update_delete() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FACULTIES, &json!({ "name": "Hufflepuff", "color": "Yellow" }))
            .await;
        assert_eq!(res.status, 201);
        let id = res.id();

        let res = app.get(&routes::faculty(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Hufflepuff");
        assert_eq!(res.body["color"], "Yellow");

        let res = app
            .put(&routes::faculty(id), &json!({ "name": "Hufflepuff", "color": "Black" }))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["color"], "Black");

        let res = app.delete(&routes::faculty(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["color"], "Black");
        assert_eq!(app.get(&routes::faculty(id)).await.status, 404);
    }

    #[tokio::test]
    async fn blank_color_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FACULTIES, &json!({ "name": "Slytherin", "color": "  " }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_missing_faculty_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::faculty(3), &json!({ "name": "X", "color": "Y" }))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Факультет с id = 3 не найден");
    }

    #[tokio::test]
    async fn delete_missing_faculty_leaves_store_unchanged() {
        let app = TestApp::spawn().await;
        let kept = app.create_faculty("Ravenclaw", "Blue").await;

        let res = app.delete(&routes::faculty(kept + 100)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app.get(routes::FACULTIES).await;
        assert_eq!(res.ids(), vec![kept]);
    }

    #[tokio::test]
    async fn gryffindor_scenario_clears_student_faculty_on_delete() {
        let app = TestApp::spawn().await;

        let faculty_id = app.create_faculty("Gryffindor", "Red").await;
        assert_eq!(faculty_id, 1);
        let student_id = app.create_student("Harry", 11, Some(faculty_id)).await;
        assert_eq!(student_id, 1);

        let res = app.get(&routes::student_faculty(1)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Gryffindor");
        assert_eq!(res.body["color"], "Red");

        let res = app.delete(&routes::faculty(1)).await;
        assert_eq!(res.status, 200);

        let res = app.get(&routes::student_faculty(1)).await;
        assert_eq!(res.status, 200);
        assert!(res.body.is_null(), "expected null, got {}", res.text);

        let res = app.get(&routes::student(1)).await;
        assert_eq!(res.status, 200);
        assert!(res.body["faculty_id"].is_null());
    }

    #[tokio::test]
    async fn faculty_of_missing_student_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::student_faculty(12)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Студент с id = 12 не найден");
    }
}

mod faculty_queries {
    use super::*;

    async fn seed(app: &TestApp) -> (i32, i32, i32) {
        let g = app.create_faculty("Gryffindor", "Red").await;
        let s = app.create_faculty("Slytherin", "Green").await;
        let r = app.create_faculty("Ravenclaw", "Blue").await;
        (g, s, r)
    }

    #[tokio::test]
    async fn filter_by_exact_color() {
        let app = TestApp::spawn().await;
        let (_, s, _) = seed(&app).await;

        let res = app.get(&format!("{}?color=Green", routes::FACULTIES)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![s]);

        let res = app.get(&format!("{}?color=green", routes::FACULTIES)).await;
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn filter_by_name_or_color_ignores_case() {
        let app = TestApp::spawn().await;
        let (g, _, r) = seed(&app).await;

        let res = app
            .get(&format!("{}?nameOrColor=gryffindor", routes::FACULTIES))
            .await;
        assert_eq!(res.ids(), vec![g]);

        let res = app
            .get(&format!("{}?nameOrColor=BLUE", routes::FACULTIES))
            .await;
        assert_eq!(res.ids(), vec![r]);

        let res = app
            .get(&format!("{}?nameOrColor=Hufflepuff", routes::FACULTIES))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn filter_by_name_or_color_folds_cyrillic_case() {
        let app = TestApp::spawn().await;
        let g = app.create_faculty("Гриффиндор", "Красный").await;
        app.create_faculty("Когтевран", "Синий").await;

        for term in ["Гриффиндор", "гриффиндор", "КРАСНЫЙ"] {
            let res = app
                .get(&format!("{}?nameOrColor={term}", routes::FACULTIES))
                .await;
            assert_eq!(res.status, 200);
            assert_eq!(res.ids(), vec![g], "term {term}");
        }
    }

    #[tokio::test]
    async fn combined_filters_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!("{}?color=Red&nameOrColor=Red", routes::FACULTIES))
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn students_of_faculty() {
        let app = TestApp::spawn().await;
        let (g, s, _) = seed(&app).await;
        let harry = app.create_student("Harry", 11, Some(g)).await;
        app.create_student("Draco", 11, Some(s)).await;
        let ron = app.create_student("Ron", 11, Some(g)).await;

        let res = app.get(&routes::faculty_students(g)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![harry, ron]);

        let res = app.get(&routes::faculty_students(999)).await;
        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn longest_name_prefers_lowest_id_on_ties() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::LONGEST_FACULTY_NAME).await;
        assert_eq!(res.status, 200);
        assert!(res.body.is_null());

        app.create_faculty("Ravenclaw", "Blue").await;
        app.create_faculty("Gryffindor", "Red").await;
        app.create_faculty("Hufflepuff", "Yellow").await;

        let res = app.get(routes::LONGEST_FACULTY_NAME).await;
        assert_eq!(res.body, json!("Gryffindor"));
    }
}
