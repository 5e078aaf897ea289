use crate::notifications::{
    send_appointment_reminders::SendAppointmentRemindersUseCase,
    send_medication_reminders::SendMedicationRemindersUseCase,
    send_prescription_alerts::SendPrescriptionAlertsUseCase,
};
use crate::shared::usecase::{execute, UseCase};
use actix_web::rt::time::sleep;
use mediconnect_infra::MediconnectContext;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Time between appointment reminder passes.
const APPOINTMENT_SCAN_INTERVAL: Duration = Duration::from_secs(300);
/// Time between medication reminder passes. One pass per wall clock minute.
const MEDICATION_SCAN_INTERVAL: Duration = Duration::from_secs(60);
/// Time between prescription alert passes.
const PRESCRIPTION_SCAN_INTERVAL: Duration = Duration::from_secs(1800);
/// Wait after a failed pass before the store is queried again.
const SCAN_ERROR_BACKOFF: Duration = Duration::from_secs(300);

/// Stops the scan loops. The jobs watch the channel and exit after their
/// current pass instead of sleeping again.
pub struct JobSchedulersHandle {
    shutdown: watch::Sender<bool>,
}

impl JobSchedulersHandle {
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }
}

pub fn start_job_schedulers(ctx: MediconnectContext) -> JobSchedulersHandle {
    let (tx, rx) = watch::channel(false);
    start_appointment_reminders_job(ctx.clone(), rx.clone());
    start_medication_reminders_job(ctx.clone(), rx.clone());
    start_prescription_alerts_job(ctx, rx);
    JobSchedulersHandle { shutdown: tx }
}

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

fn start_appointment_reminders_job(ctx: MediconnectContext, mut shutdown: watch::Receiver<bool>) {
    actix_web::rt::spawn(async move {
        loop {
            let delay = match execute(SendAppointmentRemindersUseCase::default(), &ctx).await {
                Ok(_) => APPOINTMENT_SCAN_INTERVAL,
                Err(_) => SCAN_ERROR_BACKOFF,
            };
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }
        info!("Appointment reminder job stopped");
    });
}

fn start_medication_reminders_job(ctx: MediconnectContext, mut shutdown: watch::Receiver<bool>) {
    actix_web::rt::spawn(async move {
        // Align passes with the start of a wall clock minute so that each
        // pass sees a fresh HH:MM value.
        let now = ctx.sys.get_timestamp_millis();
        let start_delay = get_start_delay(now as usize, 0);
        tokio::select! {
            _ = sleep(Duration::from_secs(start_delay as u64)) => {}
            _ = shutdown.changed() => return,
        }

        // The use case remembers which minute each schedule last fired in,
        // so the loop keeps one value alive instead of building a fresh one
        // per pass.
        let mut usecase = SendMedicationRemindersUseCase::default();
        loop {
            let delay = match usecase.execute(&ctx).await {
                Ok(_) => MEDICATION_SCAN_INTERVAL,
                Err(e) => {
                    error!("Medication reminder pass failed: {:?}", e);
                    SCAN_ERROR_BACKOFF
                }
            };
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }
        info!("Medication reminder job stopped");
    });
}

fn start_prescription_alerts_job(ctx: MediconnectContext, mut shutdown: watch::Receiver<bool>) {
    actix_web::rt::spawn(async move {
        loop {
            let delay = match execute(SendPrescriptionAlertsUseCase::default(), &ctx).await {
                Ok(_) => PRESCRIPTION_SCAN_INTERVAL,
                Err(_) => SCAN_ERROR_BACKOFF,
            };
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }
        info!("Prescription alert job stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
