use fake::{
    Fake,
    faker::{lorem::en::Sentence, name::en::Name},
};
use manga_catalog::{
    db::{Store, memory::MemoryStore},
    model::{Manga, NewManga},
};

pub fn fake_new_manga(genre: &str) -> NewManga {
    NewManga {
        title: Name().fake(),
        description: Sentence(3..8).fake(),
        genre: genre.to_string(),
        cover: Some("cover.jpg".to_string()),
    }
}

pub async fn insert_fake_manga(store: &MemoryStore, genre: &str) -> Manga {
    store.create_manga(&fake_new_manga(genre)).await.unwrap()
}
