//! snmp-trap: Send an SNMPv2c trap.
//!
//! Part of the snmp-trap-sender CLI utilities.

use std::process::ExitCode;
use std::time::SystemTime;

use clap::Parser;
use snmp_trap_sender::cli::args::{OutputArgs, TargetArgs, parse_var_args};
use snmp_trap_sender::cli::hints::parse_oid;
use snmp_trap_sender::cli::output::{TrapSummary, write_error};
use snmp_trap_sender::oid::well_known;
use snmp_trap_sender::{TrapSender, ValueKind, uptime};

/// Send one SNMPv2c trap.
#[derive(Debug, Parser)]
#[command(name = "snmp-trap", version, about)]
struct Args {
    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// sysUpTime.0 value in hundredths of a second [default: time since start].
    #[arg(long = "uptime", value_name = "TICKS")]
    uptime: Option<u32>,

    /// Notification OID bound to snmpTrapOID.0 (dotted or well-known name).
    #[arg(value_name = "TRAP-OID")]
    trap_oid: String,

    /// Extra variables as OID TYPE VALUE triples (TYPE: i u c C t a o s x d n).
    #[arg(
        value_name = "OID TYPE VALUE",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    vars: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();
    uptime::init_baseline(SystemTime::now());

    let config = match args.target.trap_config() {
        Ok(config) => config,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let trap_oid = match parse_oid(&args.trap_oid) {
        Ok(oid) => oid,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let vars = match parse_var_args(&args.vars) {
        Ok(vars) => vars,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut sender = TrapSender::udp(config);
    let Some(session) = sender.session().cloned() else {
        write_error(&"no usable trap target (only SNMP version 2c can send traps)");
        return ExitCode::FAILURE;
    };

    match args.uptime {
        Some(ticks) => {
            if let Err(e) =
                sender.add_variable(well_known::SYS_UPTIME, &ticks.to_string(), ValueKind::TimeTicks)
            {
                write_error(&e);
                return ExitCode::FAILURE;
            }
        }
        None => sender.set_sys_uptime(),
    }
    sender.set_trap_oid(&trap_oid.to_string());

    for var in &vars {
        if let Err(e) = sender.add_variable(var.oid.arcs(), &var.value, var.kind) {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    }

    let mut summary = TrapSummary::new(&session, sender.bindings(), !args.output.no_hints);
    let result = sender.send();
    summary.finish(&result);

    if args.output.json {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = summary.write_json(&mut stdout) {
            eprintln!("Error writing output: {}", e);
            return ExitCode::FAILURE;
        }
    } else if result.is_ok() && !args.output.quiet {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = summary.write_human(&mut stdout) {
            eprintln!("Error writing output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            write_error(&e);
            ExitCode::FAILURE
        }
    }
}
