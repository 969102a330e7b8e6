//! Domains command implementation.

use anyhow::Result;
use std::io::Write;

use super::load_domains;
use crate::config::Config;

/// Run the domains command
pub async fn run(config: &Config) -> Result<()> {
    let domains = load_domains(config).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_domains(&mut out, &domains)?;
    out.flush()?;

    Ok(())
}

fn write_domains<W: Write>(out: &mut W, domains: &[String]) -> std::io::Result<()> {
    for domain in domains {
        writeln!(out, "{}", domain)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_domains_one_per_line() {
        let mut buf = Vec::new();
        let domains = vec!["a.example.com".to_string(), "b.example.org".to_string()];

        write_domains(&mut buf, &domains).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a.example.com\nb.example.org\n");
    }
}
