use std::fs;
use log::{error, info};
use serde::Serialize;
use yui_pd::{Simplified, SimplifyArgs};
use crate::utils::*;

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args { 
    /// File with one diagram per line, optionally prefixed by `name<TAB>`.
    pub file: String,

    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub no_split: bool,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

#[derive(Debug, Serialize)]
struct Row { 
    name: String,
    before: usize,
    after: usize,
    pieces: usize,
    unlinks: usize,
    #[serde(rename = "R_I")]
    r_i: usize,
    #[serde(rename = "R_Ia")]
    r_ia: usize,
    #[serde(rename = "R_II")]
    r_ii: usize,
    #[serde(rename = "R_IIa")]
    r_iia: usize,
    strand: usize,
    time: f64,
}

impl Row { 
    fn new(name: String, before: usize, res: &Simplified, time: std::time::Duration) -> Self { 
        let c = res.counters();
        Row { 
            name,
            before,
            after: res.crossing_count(),
            pieces: res.len(),
            unlinks: res.unlink_count(),
            r_i: c.r_i,
            r_ia: c.r_ia,
            r_ii: c.r_ii,
            r_iia: c.r_iia,
            strand: c.strand,
            time: time.as_secs_f64() * 1000.0,
        }
    }
}

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let input = fs::read_to_string(&args.file)?;
    let rows = run(&input, args);

    if let Some(path) = &args.output { 
        let mut wtr = csv_writer(path)?;
        for r in rows.iter() { 
            wtr.serialize(r)?;
        }
        wtr.flush()?;
        Ok(format!("{} rows written to {path}", rows.len()))
    } else { 
        let mut wtr = csv::Writer::from_writer(vec![]);
        for r in rows.iter() { 
            wtr.serialize(r)?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
        Ok(String::from_utf8(bytes)?.trim_end().to_owned())
    }
}

fn run(input: &str, args: &Args) -> Vec<Row> { 
    let s_args = SimplifyArgs { 
        split: !args.no_split,
        ..SimplifyArgs::default()
    };

    let lines = input.lines().map(str::trim).filter(|l| 
        !l.is_empty() && !l.starts_with('#')
    );

    lines.enumerate().filter_map(|(i, line)| { 
        let (name, code) = match line.split_once('\t') { 
            Some((name, code)) => (name.trim().to_owned(), code),
            None => (format!("{}", i + 1), line)
        };

        let d = match load_link(code, false) { 
            Ok(d) => d,
            Err(e) => { 
                error!("{name}: {e}");
                return None
            }
        };

        let before = d.crossing_count();
        let (res, time) = measure(|| d.simplify(&s_args));

        match res { 
            Ok(res) => { 
                info!("{name}: {before} -> {} ({:?})", res.crossing_count(), time);
                Some(Row::new(name, before, &res, time))
            },
            Err(e) => { 
                error!("{name}: {e}");
                None
            }
        }
    }).collect()
}
