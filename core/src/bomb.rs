use crate::*;

impl<F: Frontend> Session<F> {
    /// Drops a bomb where the player stands. Fails while another bomb is still live.
    pub fn plant_bomb(&mut self) -> bool {
        if let Some(bomb) = self.bomb {
            log::trace!("Bomb already planted at {:?}", bomb.position);
            return false;
        }

        let position = self.player();
        self.field_mut().set_tile(position, Tile::Bomb);
        self.bomb = Some(Bomb {
            position,
            visible: true,
        });
        log::debug!("Bomb planted at {:?}", position);
        true
    }

    /// Blinks the live bomb and returns whether it is now drawn.
    pub fn flash_bomb(&mut self) -> bool {
        let Some(bomb) = self.bomb.as_mut() else {
            return false;
        };

        let position = bomb.position;
        bomb.visible = !bomb.visible;
        let visible = bomb.visible;

        let sprite = if visible { Tile::Bomb } else { Tile::Empty };
        self.frontend_mut().render(position, sprite.into());
        visible
    }

    /// Blows up the live bomb, returns `false` when there was none.
    ///
    /// The bomb cell and every destructible neighbour become empty and are explored again,
    /// all in-bounds neighbours show the explosion until [`Session::clear_explosion`]. A player
    /// caught in the blast ends the game.
    pub fn detonate_bomb(&mut self) -> bool {
        let Some(bomb) = self.bomb else {
            return false;
        };
        let center = bomb.position;

        self.field_mut().set_tile(center, Tile::Empty);
        self.frontend_mut().render(center, Sprite::EMPTY);

        for neighbor in self.field().iter_neighbors(center) {
            if self.tile_at(neighbor).is_destructible() {
                self.field_mut().set_tile(neighbor, Tile::Empty);
                self.explore(neighbor);
            }
            self.frontend_mut().render(neighbor, Sprite::Explosion);
        }

        if self.in_danger() {
            log::debug!("Player at {:?} caught in the blast", self.player());
            self.game_over = true;
        }
        log::debug!("Bomb detonated at {:?}", center);

        self.bomb = None;
        self.blast_center = Some(center);
        true
    }

    /// Redraws the cells around the last detonation with what they now hold.
    pub fn clear_explosion(&mut self) {
        let Some(center) = self.blast_center.take() else {
            return;
        };

        for neighbor in self.field().iter_neighbors(center) {
            self.render_content(neighbor);
        }
    }

    /// Whether the player stands on the live bomb or right next to it.
    pub fn in_danger(&self) -> bool {
        self.bomb
            .is_some_and(|bomb| manhattan_distance(bomb.position, self.player()) <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{custom, session, walk};

    #[test]
    fn second_plant_fails_until_detonation() {
        let mut session = session();

        assert!(session.plant_bomb());
        session.move_player(Direction::Right);
        assert!(!session.plant_bomb());
        assert_eq!(session.bomb().map(|bomb| bomb.position), Some((0, 0)));
        assert_eq!(session.tile_at((0, 0)), Tile::Bomb);

        assert!(session.detonate_bomb());
        assert!(session.plant_bomb());
        assert_eq!(session.bomb().map(|bomb| bomb.position), Some((1, 0)));
    }

    #[test]
    fn flash_bomb_alternates_sprites() {
        let mut session = session();
        session.plant_bomb();
        session.move_player(Direction::Up);

        assert!(!session.flash_bomb());
        assert_eq!(session.frontend().sprite_at((0, 0)), Some(Sprite::EMPTY));
        assert!(session.flash_bomb());
        assert_eq!(
            session.frontend().sprite_at((0, 0)),
            Some(Sprite::Tile(Tile::Bomb))
        );
    }

    #[test]
    fn detonation_at_the_centre_of_a_breakable_cross() {
        let mut session = custom(
            &[
                &[0, 0, 0, 0, 0],
                &[0, 0, 3, 0, 0],
                &[0, 3, 0, 3, 0],
                &[0, 0, 3, 0, 0],
                &[0, 0, 0, 0, 0],
            ],
            &[],
        );
        session.toggle_cheat();
        // cut a way in from below, then walk to the centre
        walk(&mut session, &[Direction::Right, Direction::Right]);
        session.move_player(Direction::Up);
        session.inspect_facing();
        walk(&mut session, &[Direction::Up, Direction::Up]);
        assert_eq!(session.player(), (2, 2));

        assert!(session.plant_bomb());
        session.move_player(Direction::Up);
        assert_eq!(session.player(), (2, 2));
        assert!(session.in_danger());

        assert!(session.detonate_bomb());

        assert_eq!(session.tile_at((2, 2)), Tile::Empty);
        for coords in [(2, 3), (1, 2), (3, 2), (2, 1)] {
            assert_eq!(session.tile_at(coords), Tile::Empty);
            assert_eq!(session.frontend().sprite_at(coords), Some(Sprite::Explosion));
        }
        assert!(session.field().is_discovered((2, 4)));
        assert!(session.is_game_over());
        assert_eq!(session.bomb(), None);
    }

    #[test]
    fn blast_spares_solid_walls_and_distant_players() {
        let mut session = custom(&[&[0, 0, 0, 0, 4]], &[]);
        walk(&mut session, &[Direction::Right, Direction::Right, Direction::Right]);
        assert!(session.plant_bomb());
        walk(&mut session, &[Direction::Left, Direction::Left]);
        assert!(!session.in_danger());

        assert!(session.detonate_bomb());

        assert_eq!(session.tile_at((4, 0)), Tile::Unbreakable);
        assert_eq!(session.frontend().sprite_at((4, 0)), Some(Sprite::Explosion));
        assert!(!session.is_game_over());
    }

    #[test]
    fn blast_destroys_the_exit() {
        let mut session = custom(&[&[0, 0, 10]], &[]);
        session.move_player(Direction::Right);
        session.plant_bomb();
        session.move_player(Direction::Left);

        session.detonate_bomb();

        assert_eq!(session.tile_at((2, 0)), Tile::Empty);
        assert!(session.is_game_over());
    }

    #[test]
    fn clear_explosion_restores_true_content() {
        let mut session = custom(&[&[0, 0, 0, 4]], &[]);
        session.move_player(Direction::Right);
        session.move_player(Direction::Right);
        session.plant_bomb();

        session.detonate_bomb();
        session.clear_explosion();

        assert_eq!(session.frontend().sprite_at((1, 0)), Some(Sprite::EMPTY));
        assert_eq!(
            session.frontend().sprite_at((3, 0)),
            Some(Sprite::Tile(Tile::Unbreakable))
        );

        // nothing left to clear
        let revision = session.frontend().revision();
        session.clear_explosion();
        assert_eq!(session.frontend().revision(), revision);
    }

    #[test]
    fn bomb_operations_without_a_bomb_do_nothing() {
        let mut session = session();
        let revision = session.frontend().revision();

        assert!(!session.flash_bomb());
        assert!(!session.detonate_bomb());
        session.clear_explosion();
        assert!(!session.in_danger());

        assert_eq!(session.frontend().revision(), revision);
        assert!(!session.is_game_over());
    }
}
