use clap::ValueEnum;
use itertools::Itertools;
use string_builder::Builder;
use yui_pd::{Diagram, SimplifyArgs};
use crate::utils::*;

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args { 
    pub link: String,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(long)]
    pub no_local: bool,

    #[arg(long)]
    pub no_strands: bool,

    #[arg(long)]
    pub no_split: bool,

    #[arg(long)]
    pub max_dist: Option<usize>,

    #[arg(short, long, default_value = "pd")]
    pub format: Format,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

#[derive(Clone, Copy, ValueEnum, Debug, Default, PartialEq, Eq)]
#[clap(rename_all="kebab-case")]
pub enum Format { 
    #[default]
    Pd,
    SignedPd,
    Gauss,
}

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let d = load_link(&args.link, args.mirror)?;
    let n = d.crossing_count();
    let res = d.simplify(&simplify_args(args))?;

    let mut b = Builder::new(1024);

    b.append(format!("crossings: {n} -> {}\n", res.crossing_count()));
    b.append(format!("pieces: {}, unlinks: {}\n", res.len(), res.unlink_count()));
    b.append(format!("moves: {}\n", res.counters()));

    for (i, d) in res.iter().enumerate() { 
        let minimal = if d.proven_minimal() { " (minimal)" } else { "" };
        b.append(format!("[{i}] {} crossings{minimal}: {}\n", d.crossing_count(), encode(d, args.format)?));
    }

    Ok(b.string()?)
}

pub(crate) fn simplify_args(args: &Args) -> SimplifyArgs { 
    let mut s = SimplifyArgs { 
        local_moves: !args.no_local,
        strand_moves: !args.no_strands,
        split: !args.no_split,
        ..SimplifyArgs::default()
    };
    if let Some(dist) = args.max_dist { 
        s.final_max_dist = dist;
        s.start_max_dist = s.start_max_dist.min(dist);
    }
    s
}

fn encode(d: &Diagram, format: Format) -> Result<String, Box<dyn std::error::Error>> { 
    let code = match format { 
        Format::Pd       => d.pd_code()?.iter().map(|x| format!("{x:?}")).join(","),
        Format::SignedPd => d.signed_pd_code()?.iter().map(|x| format!("{x:?}")).join(","),
        Format::Gauss    => d.gauss_code::<i64>()?.iter().join(","),
    };
    Ok(format!("[{code}]"))
}
