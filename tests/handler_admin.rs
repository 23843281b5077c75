mod common;

use career_portal::domain::document::Collection;
use serde_json::{Value, json};

#[tokio::test]
async fn test_system_stats_counts() {
    let (server, _, repository) = common::make_server();

    common::seed(&repository, Collection::Users, json!({"name": "Thabo"})).await;
    common::seed(&repository, Collection::Users, json!({"name": "Lerato"})).await;
    common::create_institution(&server, "Limkokwing", "luct").await;

    for status in ["pending", "approved", "approved", "suspended"] {
        common::seed(
            &repository,
            Collection::Companies,
            json!({"name": "Co", "status": status}),
        )
        .await;
    }

    common::seed_application(&repository, "stu-1", "inst-1", "pending").await;
    common::seed_application(&repository, "stu-2", "inst-1", "approved").await;
    common::seed_application(&repository, "stu-3", "inst-2", "approved").await;
    common::seed_application(&repository, "stu-1", "inst-2", "rejected").await;
    common::seed_application(&repository, "stu-4", "inst-2", "withdrawn").await;

    let response = server.get("/admin/stats").await;

    response.assert_status_ok();
    let stats = response.json::<Value>()["data"].clone();
    assert_eq!(
        stats,
        json!({
            "totalUsers": 2,
            "totalInstitutions": 1,
            "totalCompanies": 4,
            "totalApplications": 5,
            "pendingApplications": 1,
            "approvedApplications": 2,
            "rejectedApplications": 1,
            "pendingCompanies": 1,
            "activeCompanies": 2,
            "suspendedCompanies": 1
        })
    );
}

#[tokio::test]
async fn test_system_stats_empty_store() {
    let (server, _, _) = common::make_server();

    let response = server.get("/admin/stats").await;

    response.assert_status_ok();
    let stats = response.json::<Value>()["data"].clone();
    assert_eq!(stats["totalApplications"], 0);
    assert_eq!(stats["totalCompanies"], 0);
}

#[tokio::test]
async fn test_reports() {
    let (server, _, repository) = common::make_server();
    common::seed_application(&repository, "stu-1", "inst-1", "pending").await;
    common::seed_application(&repository, "stu-2", "inst-1", "approved").await;
    common::seed_application(&repository, "stu-1", "inst-2", "rejected").await;

    let response = server.get("/admin/reports").await;

    response.assert_status_ok();
    let report = response.json::<Value>()["data"].clone();
    assert_eq!(
        report["applications"],
        json!({"total": 3, "pending": 1, "approved": 1, "rejected": 1})
    );
    assert_eq!(report["uniqueStudents"], 2);

    let institutions = report["institutions"].as_array().unwrap();
    assert_eq!(institutions.len(), 2);
    let first = institutions
        .iter()
        .find(|t| t["institutionId"] == "inst-1")
        .unwrap();
    assert_eq!(first["total"], 2);
    assert_eq!(first["approved"], 1);
}

#[tokio::test]
async fn test_institutions_list() {
    let (server, _, repository) = common::make_server();
    common::seed_application(&repository, "stu-1", "inst-1", "pending").await;
    common::seed_application(&repository, "stu-2", "inst-2", "pending").await;
    common::seed_application(&repository, "stu-3", "inst-1", "approved").await;

    let response = server.get("/institutions-list").await;

    response.assert_status_ok();
    let mut ids: Vec<String> = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["inst-1", "inst-2"]);
}
