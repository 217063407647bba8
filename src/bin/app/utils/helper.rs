use super::err;
use regex::Regex;
use yui_pd::{Diagram, PdLabel};

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> Result<R, Box<dyn std::error::Error>>
where F: FnOnce() -> Result<R, Box<dyn std::error::Error>> + std::panic::UnwindSafe {
    std::panic::catch_unwind(|| {
        f()
    }).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "Unknown Source of Error".to_owned()
            }
        };
        err!("panic: {info}")
    })
}

/// Reads a diagram from one of:
///
/// * a JSON PD code, `[[1,4,2,5],...]`,
/// * a JSON signed PD code, `[[1,4,2,5,1],...]`,
/// * a Mathematica style PD code, `PD[X[1,4,2,5], ...]`,
/// * a braid closure, `braid:3:[1,-2,1,-2]`.
pub fn load_link(input: &str, mirror: bool) -> Result<Diagram, Box<dyn std::error::Error>> {
    let input = input.trim();

    let d = {
        if let Ok(code) = serde_json::from_str::<Vec<[PdLabel; 4]>>(input) {
            Diagram::from_pd_code(&code)?
        } else if let Ok(code) = serde_json::from_str::<Vec<[PdLabel; 5]>>(input) {
            Diagram::from_signed_pd_code(&code)?
        } else if let Some(code) = parse_x_code(input)? {
            Diagram::from_pd_code(&code)?
        } else if let Some((strands, word)) = parse_braid(input)? {
            Diagram::from_braid(strands, &word)?
        } else {
            return err!("invalid input link: '{}'", input);
        }
    };

    if mirror {
        Ok(d.mirror())
    } else {
        Ok(d)
    }
}

fn parse_x_code(input: &str) -> Result<Option<Vec<[PdLabel; 4]>>, Box<dyn std::error::Error>> {
    let outer = Regex::new(r"^PD\[(.*)\]$")?;
    let Some(m) = outer.captures(input) else {
        return Ok(None)
    };

    let body = m[1].trim();
    let x = Regex::new(r"X\[\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*\]")?;

    let mut code = vec![];
    for c in x.captures_iter(body) {
        let mut e = [0; 4];
        for i in 0..4 {
            e[i] = c[i + 1].parse::<PdLabel>()?;
        }
        code.push(e);
    }

    // every non-separator character must belong to some X[...].
    let rest = body.chars().filter(|c| !c.is_whitespace() && *c != ',').count();
    let used = x.captures_iter(body).map(|c|
        c[0].chars().filter(|c| !c.is_whitespace() && *c != ',').count()
    ).sum::<usize>();

    if rest != used {
        return err!("invalid PD expression: '{}'", input);
    }

    Ok(Some(code))
}

fn parse_braid(input: &str) -> Result<Option<(usize, Vec<i32>)>, Box<dyn std::error::Error>> {
    let r = Regex::new(r"^braid:\s*(\d+)\s*:\s*(\[.*\])$")?;
    let Some(m) = r.captures(input) else {
        return Ok(None)
    };

    let strands = m[1].parse::<usize>()?;
    let word = serde_json::from_str::<Vec<i32>>(&m[2])?;

    Ok(Some((strands, word)))
}

pub fn csv_writer(path: &str) -> Result<csv::Writer<std::fs::File>, Box<dyn std::error::Error>> {
    use std::fs::OpenOptions;

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let wtr = csv::Writer::from_writer(file);

    Ok(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json() {
        let d = load_link("[[1,4,2,5],[3,6,4,1],[5,2,6,3]]", false).unwrap();
        assert_eq!(d.crossing_count(), 3);
        assert_eq!(d.writhe(), -3);
    }

    #[test]
    fn load_json_mirror() {
        let d = load_link("[[1,4,2,5],[3,6,4,1],[5,2,6,3]]", true).unwrap();
        assert_eq!(d.writhe(), 3);
    }

    #[test]
    fn load_signed() {
        let d = load_link("[[1,4,2,5,-1],[3,6,4,1,-1],[5,2,6,3,-1]]", false).unwrap();
        assert_eq!(d.crossing_count(), 3);
    }

    #[test]
    fn load_x_code() {
        let d = load_link("PD[X[1, 4, 2, 5], X[3, 6, 4, 1], X[5, 2, 6, 3]]", false).unwrap();
        assert_eq!(d.crossing_count(), 3);
        assert_eq!(d.writhe(), -3);
    }

    #[test]
    fn load_x_code_garbage() {
        assert!(load_link("PD[X[1, 4, 2, 5], Y[3, 6, 4, 1]]", false).is_err());
    }

    #[test]
    fn load_braid() {
        let d = load_link("braid:3:[1,-2,1,-2]", false).unwrap();
        assert_eq!(d.crossing_count(), 4);
        assert_eq!(d.writhe(), 0);
    }

    #[test]
    fn load_empty() {
        let d = load_link("[]", false).unwrap();
        assert_eq!(d.crossing_count(), 0);
    }

    #[test]
    fn load_invalid() {
        assert!(load_link("3_1", false).is_err());
        assert!(load_link("braid:2:[3]", false).is_err());
    }
}
