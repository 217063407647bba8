mod common;

use common::*;
use yui_pd::{simplify, Diagram, SimplifyArgs};

macro_rules! test {
    ($name:ident, $diagram:expr, $crossings:expr, $pieces:expr, $unlinks:expr) => {
        #[test]
        fn $name() { 
            let d: Diagram = $diagram;
            let f = jones(&d);
            let res = simplify(d, &SimplifyArgs::default()).unwrap();

            assert_eq!(res.iter().map(|d| d.crossing_count()).collect::<Vec<_>>(), $crossings);
            assert_eq!(res.len(), $pieces);
            assert_eq!(res.unlink_count(), $unlinks);
            assert!(res.iter().all(|d| d.is_valid()));

            if res.len() == 1 && res.unlink_count() == 0 { 
                assert_eq!(jones(&res.diagrams()[0]), f);
            }
        }
    };
}

fn pd(code: &[[i64; 4]]) -> Diagram { 
    Diagram::from_pd_code(code).unwrap()
}

fn braid(strands: usize, word: &[i32]) -> Diagram { 
    Diagram::from_braid(strands, word).unwrap()
}

test!(trefoil_pd,    pd(&[[1, 4, 2, 5], [3, 6, 4, 1], [5, 2, 6, 3]]), vec![3], 1, 0);
test!(figure_eight,  pd(&[[4, 2, 5, 1], [8, 6, 1, 5], [6, 3, 7, 4], [2, 7, 3, 8]]), vec![4], 1, 0);
test!(cinquefoil,    braid(2, &[1; 5]), vec![5], 1, 0);
test!(hopf,          braid(2, &[1, 1]), vec![2], 1, 0);
test!(borromean,     braid(3, &[1, -2, 1, -2, 1, -2]), vec![6], 1, 0);
test!(unknot_conj,   braid(4, &[2, -1, 1, 2, 3, 1, -2]), vec![0], 1, 0);
test!(unlink_2,      braid(2, &[1, -1]), vec![0], 1, 1);
test!(unlink_3,      braid(3, &[1, 2, -2, -1]), vec![0], 1, 2);
test!(granny,        braid(3, &[1, 1, 1, 2, 2, 2]), vec![3, 3], 2, 0);
test!(square,        braid(3, &[1, 1, 1, -2, -2, -2]), vec![3, 3], 2, 0);
test!(trefoil_curls, braid(4, &[1, 1, 1, 2, -3]), vec![3], 1, 0);
test!(trefoil_bigon,  braid(2, &[1, 1, -1, 1, 1]), vec![3], 1, 0);

#[test]
fn minimal_flags() { 
    for d in [
        pd(&[[1, 4, 2, 5], [3, 6, 4, 1], [5, 2, 6, 3]]),
        braid(3, &[1, -2, 1, -2, 1, -2]),
    ] { 
        let res = simplify(d, &SimplifyArgs::default()).unwrap();
        assert!(res.iter().all(|d| d.proven_minimal()));
    }
}

#[test]
fn mirror() { 
    let d = braid(2, &[1, 1, 1]).mirror();
    let res = simplify(d, &SimplifyArgs::default()).unwrap();
    assert_eq!(res.diagrams()[0].writhe(), -3);
}

#[test]
fn strands_only() { 
    let args = SimplifyArgs { local_moves: false, ..Default::default() };
    let res = simplify(braid(2, &[1, -1]), &args).unwrap();
    assert_eq!(res.crossing_count(), 0);
    assert_eq!(res.component_count().unwrap(), 2);
}

// cargo test -r -- --exact large_braid --nocapture --include-ignored
#[test]
#[ignore]
fn large_braid() { 
    init_logger();

    let word = (0..400).map(|i| { 
        let g = (i * 7 + 3) % 5 + 1;
        if (i * 13) % 3 == 0 { -g } else { g }
    }).collect::<Vec<i32>>();

    let d = braid(6, &word);
    let comps = d.link_component_count().unwrap();
    let res = simplify(d, &SimplifyArgs::default()).unwrap();

    println!("{} diagrams, {} crossings, {} unlinks: {}", 
        res.len(), res.crossing_count(), res.unlink_count(), res.counters()
    );
    assert_eq!(res.component_count().unwrap(), comps);
}
