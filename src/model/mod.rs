pub mod band;
pub mod user;

pub use band::{BandPayload, Coordinates, MusicBand, MusicGenre};
pub use user::User;
