//! Demo entry point: boots the system, walks one appointment through its
//! whole lifecycle, and round-trips a replication token.

use campus_one::appointment_book::BookingRequest;
use campus_one::config::Config;
use campus_one::lifecycle::CampusSystem;
use campus_one::model::UserRole;
use campus_one::registry::LoginRequest;
use chrono::Local;
use ledger_actor::tracing::setup_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env();
    info!(data_dir = %config.data_dir.display(), "Starting Campus One");
    let system = CampusSystem::start(config).map_err(|e| e.to_string())?;

    // A student signs in and books a salon slot that has already started,
    // so one sweep pass is enough to move it along.
    let student = system
        .session
        .login(LoginRequest {
            name: Some("Adarsh Kumar".to_string()),
            email: "adarsh@students.campus.edu".to_string(),
            password: "orbit-paper-lamp".to_string(),
            role: UserRole::Student,
            shop_id: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user = %student.email, "Student session active");

    let now = Local::now().naive_local();
    let appointment = system
        .appointments
        .book(BookingRequest {
            shop_id: "shop-3".to_string(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            student_phone: "9876543210".to_string(),
            service_id: "srv-1".to_string(),
            service_name: "Haircut (Classic)".to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time_slot: now.format("%H:%M").to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(appointment = %appointment.id, "Appointment requested");

    // The salon accepts, the slot time passes, payment settles, and the
    // appointment closes.
    system
        .appointments
        .accept("shop-3", &appointment.id)
        .await
        .map_err(|e| e.to_string())?;
    let report = system
        .appointments
        .sweep(Local::now().naive_local())
        .await
        .map_err(|e| e.to_string())?;
    info!(started = report.started, "Sweep pass done");
    system
        .appointments
        .settle_payment("shop-3", &appointment.id)
        .await
        .map_err(|e| e.to_string())?;
    let closed = system
        .appointments
        .close("shop-3", &appointment.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(appointment = %closed.id, status = ?closed.status, "Appointment closed");

    // Round-trip a replication token: importing our own export is a
    // no-op.
    let token = system.export_replica().await.map_err(|e| e.to_string())?;
    info!(token_bytes = token.len(), "Directory exported");
    let report = system.import_replica(&token).await.map_err(|e| e.to_string())?;
    info!(
        added = report.added,
        replaced = report.replaced,
        "Importing our own export changed nothing"
    );

    system.session.logout().await;
    system.shutdown().await?;

    info!("Demo complete");
    Ok(())
}
