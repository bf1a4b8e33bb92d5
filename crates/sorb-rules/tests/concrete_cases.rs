//! Hand-checked acceptance sets for each model on small lattices.

use smallvec::smallvec;
use sorb_core::{Boundary, Model, Site};
use sorb_lattice::Lattice;
use sorb_rules::{AdsorptionRule, Attempt, Direction, Rule};
use sorb_test_utils::{grid_with, line_with};

fn accepted(rule: &AdsorptionRule, lattice: &Lattice) -> Vec<i64> {
    (0..lattice.site_count() as i64)
        .filter(|&i| {
            let site: Site = smallvec![i];
            rule.validate(lattice, &Attempt::at(site))
        })
        .collect()
}

#[test]
fn nn_exclusion_open_line_blocks_occupied_site_and_its_neighbours() {
    let lattice = line_with(10, Boundary::Open, &[5]);
    let rule = AdsorptionRule::new(Model::NearestNeighborExclusion, &lattice).unwrap();
    assert_eq!(accepted(&rule, &lattice), vec![0, 1, 2, 3, 7, 8, 9]);
}

#[test]
fn dimer_periodic_line_blocks_occupied_site_and_its_left_neighbour() {
    let lattice = line_with(50, Boundary::Periodic, &[34]);
    let rule = AdsorptionRule::new(Model::Dimer, &lattice).unwrap();
    let expected: Vec<i64> = (0..50).filter(|&i| i != 33 && i != 34).collect();
    assert_eq!(accepted(&rule, &lattice), expected);
}

#[test]
fn monomer_accepts_everything_but_occupied_sites() {
    let lattice = line_with(8, Boundary::Open, &[0, 7]);
    let rule = AdsorptionRule::new(Model::Monomer, &lattice).unwrap();
    assert_eq!(accepted(&rule, &lattice), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn validation_never_mutates() {
    let lattice = line_with(10, Boundary::Open, &[5]);
    let snapshot = lattice.clone();
    for model in Model::ALL {
        let rule = AdsorptionRule::new(model, &lattice).unwrap();
        let _ = accepted(&rule, &lattice);
    }
    assert_eq!(lattice, snapshot);
}

fn accepted_cells(lattice: &Lattice, accepts: impl Fn(Site) -> bool) -> Vec<(i64, i64)> {
    let [rows, cols] = [lattice.extents()[0] as i64, lattice.extents()[1] as i64];
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .filter(|&(r, c)| accepts(smallvec![r, c]))
        .collect()
}

#[test]
fn nn_exclusion_open_grid_leaves_only_corners_around_centre() {
    let lattice = grid_with(3, 3, Boundary::Open, Boundary::Open, &[(1, 1)]);
    let rule = AdsorptionRule::new(Model::NearestNeighborExclusion, &lattice).unwrap();
    let ok = accepted_cells(&lattice, |site| rule.validate(&lattice, &Attempt::at(site)));
    assert_eq!(ok, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
}

#[test]
fn dimer_torus_blocks_partners_of_occupied_site() {
    let lattice = grid_with(4, 4, Boundary::Periodic, Boundary::Periodic, &[(2, 2)]);
    let rule = AdsorptionRule::new(Model::Dimer, &lattice).unwrap();

    // Pointing down the rows: (1, 2) and (2, 2) are the blocked primaries.
    let down = Direction::forward(0);
    let ok = accepted_cells(&lattice, |site| {
        rule.validate(&lattice, &Attempt::toward(site, down))
    });
    assert_eq!(ok.len(), 14);
    assert!(!ok.contains(&(1, 2)) && !ok.contains(&(2, 2)));

    // Pointing left along the row: (2, 2) and (2, 3) are blocked.
    let left = Direction::backward(1);
    let ok = accepted_cells(&lattice, |site| {
        rule.validate(&lattice, &Attempt::toward(site, left))
    });
    assert_eq!(ok.len(), 14);
    assert!(!ok.contains(&(2, 2)) && !ok.contains(&(2, 3)));
}
