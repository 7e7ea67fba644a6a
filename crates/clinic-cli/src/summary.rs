use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use clinic_model::{AppointmentRecord, IngestReport, PatientWithAppointments};

pub fn print_ingest_summary(report: &IngestReport) {
    println!("{}", report.message);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(report.rows_read)]);
    table.add_row(vec![
        Cell::new("Rows skipped"),
        count_cell(report.rows_skipped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows without patient id"),
        count_cell(report.rows_without_patient_id, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Patients created"),
        Cell::new(report.patients_created()).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Appointments created"),
        Cell::new(report.appointments_created()).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Write errors"),
        count_cell(report.write_errors.len(), Color::Red),
    ]);
    println!("{table}");
    if report.has_write_errors() {
        eprintln!("Write errors:");
        for error in &report.write_errors {
            eprintln!("- appointment {}: {}", error.appointment_id, error.message);
        }
    }
}

pub fn print_patients(patients: &[PatientWithAppointments]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Patient Id"),
        header_cell("Name"),
        header_cell("DOB"),
        header_cell("Email"),
        header_cell("Phone"),
        header_cell("Appointments"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for entry in patients {
        let patient = &entry.record.patient;
        table.add_row(vec![
            Cell::new(entry.record.id),
            Cell::new(patient.patient_id),
            Cell::new(format!("{} {}", patient.first_name, patient.last_name)),
            optional_cell(patient.dob.map(|dob| dob.date().to_string())),
            optional_cell(patient.email.clone()),
            optional_cell(patient.phone.clone()),
            Cell::new(entry.appointments.len()),
        ]);
    }
    println!("{table}");
}

pub fn print_appointments(appointments: &[AppointmentRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Appointment Id"),
        header_cell("Date"),
        header_cell("Type"),
        header_cell("Patient Id"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in appointments {
        add_appointment_row(&mut table, record);
    }
    println!("{table}");
}

pub fn print_patient(entry: &PatientWithAppointments) {
    let patient = &entry.record.patient;
    println!(
        "Patient {} ({} {})",
        entry.record.id, patient.first_name, patient.last_name
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Patient id"),
        Cell::new(patient.patient_id),
    ]);
    table.add_row(vec![
        Cell::new("Date of birth"),
        optional_cell(patient.dob.map(|dob| dob.date().to_string())),
    ]);
    table.add_row(vec![
        Cell::new("Email"),
        optional_cell(patient.email.clone()),
    ]);
    table.add_row(vec![
        Cell::new("Phone"),
        optional_cell(patient.phone.clone()),
    ]);
    table.add_row(vec![
        Cell::new("Address"),
        optional_cell(patient.address.clone()),
    ]);
    println!("{table}");
    if entry.appointments.is_empty() {
        println!("No appointments.");
        return;
    }
    let mut appointments = Table::new();
    appointments.set_header(vec![
        header_cell("Id"),
        header_cell("Appointment Id"),
        header_cell("Date"),
        header_cell("Type"),
        header_cell("Patient Id"),
    ]);
    apply_table_style(&mut appointments);
    align_column(&mut appointments, 0, CellAlignment::Right);
    align_column(&mut appointments, 1, CellAlignment::Right);
    for record in &entry.appointments {
        add_appointment_row(&mut appointments, record);
    }
    println!("{appointments}");
}

fn add_appointment_row(table: &mut Table, record: &AppointmentRecord) {
    let appointment = &record.appointment;
    table.add_row(vec![
        Cell::new(record.id),
        Cell::new(appointment.appointment_id),
        optional_cell(appointment.appointment_date.map(|date| date.to_string())),
        Cell::new(appointment.appointment_type.clone()),
        optional_cell(appointment.patient_id.map(|id| id.to_string())),
    ]);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
