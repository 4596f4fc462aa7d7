//! Text output formatting with colors.

use chrono::{DateTime, Duration, Local, Utc};
use lubemon_core::{FieldSet, Snapshot, Vehicle};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Placeholder for a field the server has no record for.
const NO_VALUE: &str = "−";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a full snapshot.
    pub fn format_snapshot(&self, snapshot: &Snapshot) -> String {
        let mut lines = Vec::new();

        if let Some(fields) = snapshot.flat_fields() {
            lines.push(self.bold("LubeLogger instance"));
            self.push_fields(fields, &mut lines);
        } else {
            let vehicles = snapshot.vehicles();
            if vehicles.is_empty() {
                lines.push(self.dim("No vehicles"));
            }
            for (i, vehicle) in vehicles.iter().enumerate() {
                if i > 0 {
                    lines.push(String::new());
                }
                lines.push(format!(
                    "{} {}",
                    self.bold(&vehicle.name),
                    self.dim(&format!("(id {})", vehicle.id))
                ));
                self.push_fields(&vehicle.fields, &mut lines);
            }
        }

        lines.push(String::new());
        let updated = snapshot
            .updated_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        lines.push(self.dim(&format!("Updated {updated}")));

        lines.join("\n")
    }

    /// Appends the four tracked fields as indented lines.
    fn push_fields(&self, fields: &FieldSet, lines: &mut Vec<String>) {
        let odometer = fields
            .odometer_value()
            .map_or_else(|| self.dim(NO_VALUE), Self::format_number);
        lines.push(format!("  Odometer:  {odometer}"));

        let plan = fields
            .plan_due_date()
            .map_or_else(|| self.dim(NO_VALUE), |due| self.format_due_date(due));
        lines.push(format!("  Next plan: {plan}"));

        let tax = fields
            .tax_amount()
            .map_or_else(|| self.dim(NO_VALUE), |v| format!("{v:.2}"));
        lines.push(format!("  Tax:       {tax}"));

        let service = fields
            .service_date()
            .map_or_else(|| self.dim(NO_VALUE), Self::format_date);
        lines.push(format!("  Service:   {service}"));
    }

    /// Formats a plan due date, colored by how close it is.
    fn format_due_date(&self, due: DateTime<Utc>) -> String {
        let date = Self::format_date(due);
        let now = Utc::now();

        if due <= now {
            self.red(&format!("{date} (overdue)"))
        } else if due - now < Duration::days(7) {
            self.yellow(&date)
        } else {
            self.green(&date)
        }
    }

    fn format_date(date: DateTime<Utc>) -> String {
        date.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }

    fn format_number(n: f64) -> String {
        if n.fract().abs() < f64::EPSILON {
            format!("{n:.0}")
        } else {
            format!("{n}")
        }
    }

    /// Formats the vehicle list header.
    pub fn format_vehicles_header(&self) -> String {
        format!("{:<6} {}", self.bold("Id"), self.bold("Name"))
    }

    /// Formats a single vehicle line.
    pub fn format_vehicle_line(&self, vehicle: &Vehicle) -> String {
        format!("{:<6} {}", vehicle.id, vehicle.name)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{GREEN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
