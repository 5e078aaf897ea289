use mediconnect_domain::{Appointment, Doctor, MedicationSchedule, Patient};

pub fn appointment_reminder_message(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    window_label: &str,
) -> String {
    format!(
        "🔔 *Appointment reminder ({window})*\n\n\
         Patient: {patient}\n\
         Doctor: Dr. {doctor}\n\
         Specialization: {specialization}\n\
         Date: {date}\n\
         Time: {time}\n\n\
         Do not forget your visit!",
        window = window_label,
        patient = patient.full_name(),
        doctor = doctor.full_name(),
        specialization = doctor.specialization,
        date = appointment.date,
        time = appointment.time_of_day(),
    )
}

pub fn medication_alert_message(
    patient: &Patient,
    schedule: &MedicationSchedule,
    time: &str,
) -> String {
    format!(
        "💊 *Time to take your medication*\n\n\
         Patient: {patient}\n\
         Medication: {medication}\n\
         Dosage: {dosage}\n\
         Time: {time}\n\n\
         Please take your medication as prescribed by your doctor.",
        patient = patient.full_name(),
        medication = schedule.medication_name,
        dosage = schedule.dosage,
        time = time,
    )
}

pub fn prescription_alert_message(
    patient: &Patient,
    doctor: &Doctor,
    record_date: &str,
    prescriptions: &str,
) -> String {
    format!(
        "💊 *New prescription*\n\n\
         Patient: {patient}\n\
         Doctor: Dr. {doctor}\n\
         Prescribed on: {record_date}\n\
         Prescription: {prescriptions}\n\n\
         Stay healthy!",
        patient = patient.full_name(),
        doctor = doctor.full_name(),
        record_date = record_date,
        prescriptions = prescriptions,
    )
}
