#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]
fn main() {
    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    linker_hints();
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
}

/// Turns the usual undefined-symbol link failures into a hint.
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        let hint = match (args[1].as_str(), args[2].as_str()) {
            ("undefined-symbol", "_defmt_timestamp") => {
                Some("`defmt` not found - is `esp_println` linked with the `defmt-espflash` feature?")
            }
            ("undefined-symbol", "_stack_start") => Some("Is the linker script `linkall.x` missing?"),
            ("undefined-symbol", "esp_rtos_initialized" | "esp_rtos_yield_task" | "esp_rtos_task_create") => {
                Some("No scheduler - call `esp_rtos::start` before spawning tasks.")
            }
            ("undefined-symbol", _) => None,
            _ => std::process::exit(1),
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {hint}");
            eprintln!();
        }
        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg-bins=-Wl,--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
