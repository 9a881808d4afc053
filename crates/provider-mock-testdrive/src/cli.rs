use clap::builder::PossibleValue;
use clap::{Arg, ArgAction, Command, crate_authors, crate_description, crate_name, crate_version};

pub(crate) fn build_cli() -> Command {
    let mut args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("PROVIDER_MOCK_LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("PROVIDER_MOCK_LOG_FMT")
            .default_value("text")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .help("Disable colored output for logs"),
        Arg::new("webhook")
            .long("webhook")
            .short('w')
            .value_name("WEBHOOK")
            .env("PROVIDER_MOCK_WEBHOOK")
            .required(true)
            .value_parser([
                PossibleValue::new("service").help("Validates services/status updates (/service)"),
                PossibleValue::new("statefulset")
                    .help("Mutates the etcd statefulsets (/statefulset)"),
            ])
            .help("Webhook used to review the request"),
        Arg::new("request-path")
            .long("request-path")
            .short('r')
            .value_name("REQUEST_PATH")
            .env("PROVIDER_MOCK_REQUEST_PATH")
            .required(true)
            .help("File containing the AdmissionReview object in JSON format, '-' reads from stdin"),
        Arg::new("print-patched-object")
            .long("print-patched-object")
            .env("PROVIDER_MOCK_PRINT_PATCHED_OBJECT")
            .action(ArgAction::SetTrue)
            .help("Print the object obtained by applying the patch returned by the webhook"),
    ];
    args.sort_by(|a, b| a.get_id().cmp(b.get_id()));

    Command::new(crate_name!())
        .author(crate_authors!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
