use anyhow::Result;
use logstats::{collect_lines, decode_line, input, FrequencyTable};
use std::{
    fs::File,
    io::{stdout, BufRead, BufReader},
    path::PathBuf,
};
use structopt::StructOpt;

/// Write the full IP and url frequency tables of an access log as CSV.
#[derive(StructOpt)]
struct Options {
    #[structopt(parse(from_os_str))]
    file: PathBuf,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let options = Options::from_args();
    input::check_extension(&options.file)?;

    let raw_lines = BufReader::new(File::open(&options.file)?).split(b'\n').collect::<Result<Vec<_>, _>>()?;
    let lines: Vec<_> = raw_lines.iter().map(|raw| decode_line(raw)).collect();
    let mut unmatched: Vec<String> = Vec::new();
    let collected = collect_lines(&lines, &mut unmatched);

    let ips: FrequencyTable<&str> = collected.ips.iter().map(String::as_str).collect();
    let urls: FrequencyTable<&str> = collected.present_urls().collect();

    let mut writer = csv::Writer::from_writer(stdout());
    writer.write_record(["field", "value", "count"])?;
    for (field, table) in [("ip", &ips), ("url", &urls)] {
        for (value, count) in table.ranked() {
            let count = count.to_string();
            writer.write_record([field, *value, count.as_str()])?;
        }
    }
    writer.flush()?;
    eprintln!("{} lines read, {} had no IP address", collected.line_count(), unmatched.len());

    Ok(())
}
