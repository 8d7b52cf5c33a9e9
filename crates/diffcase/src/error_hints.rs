use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("unknown benchmark") {
        push_hint(&mut out, "Run `diffcase list` to see the built-in benchmarks.");
    }

    if haystack.contains("config toml") || haystack.contains("invalid setting") {
        push_hint(
            &mut out,
            "Check key names and types against the settings table (corpus_cap, draw_budget, seed, tolerance, ...).",
        );
    }

    if haystack.contains("no such file or directory") || haystack.contains("cannot find the path") {
        push_hint(&mut out, "Verify the path exists and is readable.");
    }

    if haystack.contains("corpus file") {
        push_hint(
            &mut out,
            "Regenerate the corpus with `diffcase generate <bench>` or pass `--corpus <PATH>`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
