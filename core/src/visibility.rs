use smallvec::SmallVec;

use crate::*;

/// Reveals every cell reachable from `origin` through open space.
///
/// The origin is always revealed and redrawn. Empty, diamond and exit tiles let the search
/// continue into undiscovered neighbours; every other tile is revealed but stops it. Returns
/// how many cells were newly discovered.
pub fn explore<F: Frontend + ?Sized>(field: &mut Field, origin: Coord2, frontend: &mut F) -> usize {
    if !field.in_bounds(origin) {
        return 0;
    }

    let mut revealed = usize::from(reveal(field, origin, frontend));
    let mut to_visit: SmallVec<[Coord2; 32]> = SmallVec::new();
    to_visit.push(origin);

    while let Some(coords) = to_visit.pop() {
        if !field.tile_at(coords).is_transparent() {
            continue;
        }

        for neighbor in field.iter_neighbors(coords) {
            if !field.is_discovered(neighbor) {
                revealed += usize::from(reveal(field, neighbor, frontend));
                to_visit.push(neighbor);
            }
        }
    }

    log::trace!("Explored from {:?}, revealed {} cells", origin, revealed);
    revealed
}

fn reveal<F: Frontend + ?Sized>(field: &mut Field, coords: Coord2, frontend: &mut F) -> bool {
    let newly = field.discover(coords);
    frontend.render(coords, field.tile_at(coords).into());
    newly
}
