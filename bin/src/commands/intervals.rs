//! Intervals command implementation.

use stocksync_lib::Interval;

/// List every interval code with its class, duration and table.
pub(crate) fn list_intervals() {
    println!("{:<6} {:<10} {:>10} {:<15}", "CODE", "CLASS", "SECONDS", "TABLE");
    println!("{}", "-".repeat(44));

    for interval in Interval::all() {
        println!(
            "{:<6} {:<10} {:>10} {:<15}",
            interval.as_str(),
            interval.class().as_str(),
            interval.seconds(),
            interval.table_name()
        );
    }

    println!("\nTotal: {} intervals", Interval::all().len());
}
