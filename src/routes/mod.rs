pub mod analytics;
pub mod applications;
pub mod auth;
pub mod caf_forms;
pub mod communities;
pub mod health;
pub mod notifications;
pub mod placement;
pub mod profile;
pub mod student_profiles;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    )
    .service(web::scope("/profile").service(profile::get_profile))
    .service(
        web::scope("/communities")
            .service(communities::list_communities)
            .service(communities::create_community)
            .service(communities::join_community)
            .service(communities::list_members)
            .service(communities::check_membership)
            .service(communities::list_posts)
            .service(communities::create_post)
            .service(communities::delete_community)
            .service(communities::remove_member),
    )
    .service(
        web::scope("/caf-forms")
            .service(caf_forms::list_caf_forms)
            .service(caf_forms::create_caf_form)
            .service(caf_forms::update_caf_form)
            .service(caf_forms::delete_caf_form),
    )
    .service(
        web::scope("/companies")
            .service(placement::list_companies)
            .service(placement::create_company),
    )
    .service(
        web::scope("/jobs")
            .service(placement::list_jobs)
            .service(placement::create_job)
            .service(placement::delete_job),
    )
    .service(
        web::scope("/events")
            .service(placement::list_events)
            .service(placement::create_event),
    )
    .service(
        web::scope("/documents")
            .service(placement::list_documents)
            .service(placement::create_document),
    )
    .service(
        web::scope("/placement-events")
            .service(placement::list_placement_events)
            .service(placement::create_placement_event),
    )
    .service(
        web::scope("/applications")
            .service(applications::list_applications)
            .service(applications::create_application)
            .service(applications::update_application_status)
            .service(applications::list_student_applications),
    )
    .service(
        web::scope("/student-profile")
            .service(student_profiles::get_student_profile)
            .service(student_profiles::update_student_profile),
    )
    .service(
        web::scope("/notifications")
            .service(notifications::list_notifications)
            .service(notifications::create_notification)
            .service(notifications::mark_read),
    )
    .service(analytics::admin_stats)
    .service(analytics::college_analytics);
}
