use std::fmt::Display;
use itertools::Itertools;
use num_traits::{PrimInt, Signed};
use string_builder::Builder;
use crate::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    dispatch_int!(&args.int_type, describe, args)
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args { 
    pub link: String,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(short = 't', long, default_value = "i32")]
    pub int_type: IType,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

fn describe<T>(args: &Args) -> Result<String, Box<dyn std::error::Error>>
where T: PrimInt + Signed + Display {
    let d = load_link(&args.link, args.mirror)?;

    let mut b = Builder::new(1024);

    b.append(format!("crossings: {}\n", d.crossing_count()));
    b.append(format!("arcs: {}\n", d.arc_count()));
    b.append(format!("components: {}\n", d.link_component_count()?));
    b.append(format!("diagram components: {}\n", d.diagram_component_count()?));
    b.append(format!("faces: {}\n", d.face_count()?));
    b.append(format!("writhe: {}\n", d.writhe()));
    b.append(format!("alternating: {}\n", d.is_alternating()?));
    b.append(format!("reduced: {}\n", d.is_reduced()?));

    let code = d.gauss_code::<T>()?;
    b.append(format!("gauss ({}): [{}]\n", args.int_type, code.iter().join(",")));

    let (code, lens) = d.oriented_gauss_code::<T>()?;
    b.append(format!("oriented gauss ({}): [{}] {:?}\n", args.int_type, code.iter().join(","), lens));

    Ok(b.string()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trefoil() { 
        let args = Args { link: "[[1,4,2,5],[3,6,4,1],[5,2,6,3]]".to_owned(), ..Default::default() };
        let res = dispatch(&args).unwrap();
        assert!(res.contains("crossings: 3\n"));
        assert!(res.contains("components: 1\n"));
        assert!(res.contains("faces: 5\n"));
        assert!(res.contains("writhe: -3\n"));
        assert!(res.contains("alternating: true\n"));
    }

    #[test]
    fn narrow_width() { 
        let word = vec!["1"; 40].join(",");
        let args = Args { link: format!("braid:2:[{word}]"), int_type: IType::I16, ..Default::default() };
        assert!(dispatch(&args).is_ok());
    }
}
