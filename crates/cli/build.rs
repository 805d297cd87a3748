use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("kotoba")
        .version("1.0.0")
        .author("Kotoba Contributors")
        .about("Kanji word frequency lists from Japanese pages")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (cards, text, csv, json)")
                .value_name("FORMAT")
                .default_value("cards")
                .value_parser(["cards", "text", "csv", "json"]),
        )
        .arg(clap::arg!(--target <NUM> "Number of defined words to collect").default_value("20"))
        .arg(clap::arg!(--pool <NUM> "Maximum ranked candidates to look up").default_value("50"))
        .arg(clap::arg!(--concurrency <NUM> "Dictionary lookups in flight at once").default_value("1"))
        .arg(
            clap::arg!(--tokenizer <NAME> "Tokenizer (lindera, script)")
                .default_value("lindera")
                .value_parser(["lindera", "script"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--dictionary_url <URL> "Dictionary search endpoint").value_name("URL"))
        .arg(clap::arg!(--remove_hidden "Drop elements styled display:none or visibility:hidden before counting"))
        .arg(clap::arg!(--candidates "Print the ranked candidate pool without dictionary lookups"))
        .arg(clap::arg!(--copy "Copy the word list to the system clipboard"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "kotoba", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "kotoba", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "kotoba", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "kotoba", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
