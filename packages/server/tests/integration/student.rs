use serde_json::json;

use crate::common::{TestApp, routes};

mod student_crud {
    use super::*;

    #[tokio::test]
    async fn create_then_get_without_faculty() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({ "name": "Luna", "age": 14 }))
            .await;
        assert_eq!(res.status, 201);
        let id = res.id();
        assert_eq!(res.body["name"], "Luna");
        assert_eq!(res.body["age"], 14);
        assert!(res.body["faculty_id"].is_null());

        let res = app.get(&routes::student(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["name"], "Luna");
    }

    #[tokio::test]
    async fn create_then_get_with_faculty() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Ravenclaw", "Blue").await;

        let id = app.create_student("Luna", 14, Some(faculty_id)).await;

        let res = app.get(&routes::student(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["faculty_id"], faculty_id);
    }

    #[tokio::test]
    async fn create_with_unknown_faculty_is_not_found_and_stores_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({ "name": "Harry", "age": 11, "faculty_id": 77 }),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Факультет с id = 77 не найден");

        let count = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(count.body["count"], 0);
    }

    #[tokio::test]
    async fn get_missing_student_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::student(5)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Студент с id = 5 не найден");
    }

    #[tokio::test]
    async fn negative_age_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({ "name": "Dobby", "age": -1 }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::STUDENTS, "{\"name\": ").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Gryffindor", "Red").await;
        let id = app.create_student("Neville", 11, Some(faculty_id)).await;

        let res = app
            .put(&routes::student(id), &json!({ "name": "Neville L.", "age": 17 }))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Neville L.");
        assert_eq!(res.body["age"], 17);
        assert!(res.body["faculty_id"].is_null());

        let res = app.get(&routes::student(id)).await;
        assert_eq!(res.body["age"], 17);
    }

    #[tokio::test]
    async fn update_missing_student_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::student(9), &json!({ "name": "Nobody", "age": 20 }))
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn update_with_unknown_faculty_keeps_old_values() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Seamus", 12, None).await;

        let res = app
            .put(
                &routes::student(id),
                &json!({ "name": "Seamus F.", "age": 13, "faculty_id": 404 }),
            )
            .await;
        assert_eq!(res.status, 404);

        let res = app.get(&routes::student(id)).await;
        assert_eq!(res.body["name"], "Seamus");
        assert_eq!(res.body["age"], 12);
    }

    #[tokio::test]
    async fn delete_returns_removed_student() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Cedric", 17, None).await;

        let res = app.delete(&routes::student(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Cedric");

        assert_eq!(app.get(&routes::student(id)).await.status, 404);
        assert_eq!(app.delete(&routes::student(id)).await.status, 404);
    }
}

mod student_filters {
    use super::*;

    async fn seed(app: &TestApp) -> (i32, i32, i32) {
        let a = app.create_student("Harry", 11, None).await;
        let b = app.create_student("Hermione", 12, None).await;
        let c = app.create_student("Percy", 16, None).await;
        (a, b, c)
    }

    #[tokio::test]
    async fn list_without_filter_returns_everyone() {
        let app = TestApp::spawn().await;
        let (a, b, c) = seed(&app).await;

        let res = app.get(routes::STUDENTS).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![a, b, c]);
    }

    #[tokio::test]
    async fn exact_age_filter() {
        let app = TestApp::spawn().await;
        let (_, b, _) = seed(&app).await;

        let res = app.get(&format!("{}?age=12", routes::STUDENTS)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![b]);

        let res = app.get(&format!("{}?age=40", routes::STUDENTS)).await;
        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn age_range_is_inclusive() {
        let app = TestApp::spawn().await;
        let (a, b, _) = seed(&app).await;

        let res = app
            .get(&format!("{}?minAge=11&maxAge=12", routes::STUDENTS))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![a, b]);
    }

    #[tokio::test]
    async fn inverted_range_is_empty() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get(&format!("{}?minAge=16&maxAge=11", routes::STUDENTS))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn half_range_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?minAge=11", routes::STUDENTS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn non_numeric_age_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?age=eleven", routes::STUDENTS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod student_statistics {
    use super::*;

    #[tokio::test]
    async fn count_and_average_on_empty_school() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 0);

        let res = app.get(routes::STUDENT_AVERAGE_AGE).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["average_age"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn count_and_average() {
        let app = TestApp::spawn().await;
        app.create_student("Fred", 13, None).await;
        app.create_student("George", 13, None).await;
        app.create_student("Ginny", 10, None).await;

        let res = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(res.body["count"], 3);

        let res = app.get(routes::STUDENT_AVERAGE_AGE).await;
        assert_eq!(res.body["average_age"].as_f64(), Some(12.0));
    }

    #[tokio::test]
    async fn last_five_is_newest_first() {
        let app = TestApp::spawn().await;
        let mut ids = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            ids.push(app.create_student(name, 10 + i as i32, None).await);
        }

        let res = app.get(routes::STUDENT_LAST_FIVE).await;
        assert_eq!(res.status, 200);
        let expected: Vec<i32> = ids.iter().rev().take(5).copied().collect();
        assert_eq!(res.ids(), expected);
    }

    #[tokio::test]
    async fn names_starting_with_letter() {
        let app = TestApp::spawn().await;
        app.create_student("harry", 11, None).await;
        app.create_student("Ron", 11, None).await;
        app.create_student("Hermione", 12, None).await;

        let res = app.get(&routes::names_starting_with("H")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!(["HARRY", "HERMIONE"]));

        let res = app.get(&routes::names_starting_with("z")).await;
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn names_starting_with_more_than_one_letter_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::names_starting_with("Ha")).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
