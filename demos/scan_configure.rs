//! Scan a configure script, print its macro calls and lint it.

fn main() {
    let input = "\
dnl Process this file with autoconf to produce a configure script.
AC_INIT([hello], [1.0])
AC_CONFIG_AUX_DIR(config)
AM_INIT_AUTOMAKE([foreign -Wall])
AC_PROG_CC
AC_OUTPUT
";

    let calls = atlint::parse_configure(input).expect("scan failed");
    println!("Calls: {}", calls.len());
    for call in &calls {
        println!("  {} at {}", call.name(), call.position());
        for arg in call.arguments() {
            println!("    {:?} at {}", arg.text(), arg.position());
        }
    }

    let registry = atlint::Registry::builtin().expect("builtin rules compile");
    println!("\nDiagnostics:");
    for diag in registry.run(&calls, &atlint::Context::new("configure.ac")) {
        println!("  {diag}");
    }

    println!();
    match atlint::scan_calls("AC_INIT([hello],\n  [1.0]\n") {
        Ok(_) => println!("Scanned OK (unexpected)"),
        Err(e) => {
            println!("Scan error: {e}");
            println!("  Kind: {:?}", e.kind);
        }
    }
}
