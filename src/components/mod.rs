mod player_card;

pub use player_card::PlayerCard;
