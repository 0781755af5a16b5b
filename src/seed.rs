//! Bundled sample catalog. Sessions start from this until the catalog
//! service answers, and the mock backend serves it.

use time::macros::datetime;

use crate::catalog::models::{
    Author, Book, CategoryChip, Chapter, Comment, Genre, HeroSlide, User,
};

/// Price of every premium chapter in the sample catalog.
const PREMIUM_COST: u32 = 5;

const CHAPTER_TITLES: [&str; 6] = [
    "Le commencement",
    "Premières rencontres",
    "Le secret",
    "La tempête",
    "Révélations",
    "Le dernier souffle",
];

struct BookSeed {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    author_id: &'static str,
    genre: Genre,
    blurb: &'static str,
    chapters: usize,
    free: usize,
    total_likes: u64,
    rating: f32,
}

const BOOKS: [BookSeed; 8] = [
    BookSeed {
        id: "b-1",
        title: "Les Ombres d'Abidjan",
        author: "Awa Koné",
        author_id: "a-1",
        genre: Genre::Mystere,
        blurb: "Une inspectrice remonte la piste d'un collectionneur disparu.",
        chapters: 5,
        free: 3,
        total_likes: 12_400,
        rating: 4.7,
    },
    BookSeed {
        id: "b-2",
        title: "Un Amour à Dakar",
        author: "Fatou Diop",
        author_id: "a-2",
        genre: Genre::Romance,
        blurb: "Deux architectes rivaux, un chantier, un été brûlant.",
        chapters: 4,
        free: 2,
        total_likes: 18_900,
        rating: 4.8,
    },
    BookSeed {
        id: "b-3",
        title: "La Trahison du Griot",
        author: "Moussa Traoré",
        author_id: "a-3",
        genre: Genre::Trahison,
        blurb: "Le conteur du village garde un secret qui pourrait tout détruire.",
        chapters: 6,
        free: 3,
        total_likes: 9_800,
        rating: 4.5,
    },
    BookSeed {
        id: "b-4",
        title: "Nuit Blanche à Lomé",
        author: "Awa Koné",
        author_id: "a-1",
        genre: Genre::Thriller,
        blurb: "Une nuit, un port, une cargaison qui n'aurait jamais dû arriver.",
        chapters: 5,
        free: 2,
        total_likes: 15_200,
        rating: 4.6,
    },
    BookSeed {
        id: "b-5",
        title: "Le Royaume des Baobabs",
        author: "Kofi Mensah",
        author_id: "a-4",
        genre: Genre::Fantastique,
        blurb: "Les arbres parlent, et ils ont choisi une héritière.",
        chapters: 4,
        free: 2,
        total_likes: 7_300,
        rating: 4.4,
    },
    BookSeed {
        id: "b-6",
        title: "Cœurs Indomptés",
        author: "Fatou Diop",
        author_id: "a-2",
        genre: Genre::Romance,
        blurb: "Une cavalière et un vétérinaire que tout oppose.",
        chapters: 5,
        free: 3,
        total_likes: 21_000,
        rating: 4.9,
    },
    BookSeed {
        id: "b-7",
        title: "Les Larmes du Fleuve",
        author: "Moussa Traoré",
        author_id: "a-3",
        genre: Genre::Drame,
        blurb: "Trois générations de pêcheurs face à la montée des eaux.",
        chapters: 3,
        free: 2,
        total_likes: 5_600,
        rating: 4.2,
    },
    BookSeed {
        id: "b-8",
        title: "L'Expédition Sahel",
        author: "Kofi Mensah",
        author_id: "a-4",
        genre: Genre::Aventure,
        blurb: "Cinq amis, deux jeeps et une carte incomplète.",
        chapters: 3,
        free: 3,
        total_likes: 4_100,
        rating: 4.1,
    },
];

pub fn books() -> Vec<Book> {
    BOOKS.iter().map(build_book).collect()
}

fn build_book(seed: &BookSeed) -> Book {
    let chapters: Vec<Chapter> = (0..seed.chapters)
        .map(|i| build_chapter(seed, i))
        .collect();

    Book {
        id: seed.id.into(),
        title: seed.title.to_string(),
        author: seed.author.to_string(),
        author_id: seed.author_id.into(),
        cover: format!("https://img.plume.example/covers/{}.jpg", seed.id),
        description: seed.blurb.to_string(),
        is_paid: seed.free < seed.chapters,
        free_chapters_count: seed.free as u32,
        chapters,
        total_likes: seed.total_likes,
        category: seed.genre,
        rating: seed.rating,
    }
}

fn build_chapter(seed: &BookSeed, i: usize) -> Chapter {
    let number = i as u32 + 1;
    let title = CHAPTER_TITLES[i % CHAPTER_TITLES.len()];
    let content = format!(
        "{}, chapitre {}.\n\n{}\n\nLa suite au prochain chapitre.",
        seed.title, number, seed.blurb
    );
    let paid = i >= seed.free;

    Chapter {
        id: format!("{}-c{}", seed.id, number).into(),
        number,
        title: title.to_string(),
        word_count: content.split_whitespace().count() as u32,
        content,
        views: Some(seed.total_likes * 3 / number as u64),
        image: (i == 0).then(|| format!("https://img.plume.example/scenes/{}.jpg", seed.id)),
        likes: (seed.total_likes / (seed.chapters as u64 * 4)) as u32 / number,
        comments: if i == 0 { comments(seed) } else { Vec::new() },
        is_liked: false,
        is_paid: paid,
        coin_cost: if paid { PREMIUM_COST } else { 0 },
    }
}

fn comments(seed: &BookSeed) -> Vec<Comment> {
    vec![
        Comment {
            id: format!("{}-m1", seed.id).into(),
            user_id: "u-2".into(),
            user_name: "Yao Kouassi".to_string(),
            user_avatar: "https://img.plume.example/avatars/u-2.jpg".to_string(),
            text: "Impossible de m'arrêter, vivement la suite !".to_string(),
            date: datetime!(2024-03-12 18:30 UTC),
        },
        Comment {
            id: format!("{}-m2", seed.id).into(),
            user_id: "u-3".into(),
            user_name: "Mariam Sow".to_string(),
            user_avatar: "https://img.plume.example/avatars/u-3.jpg".to_string(),
            text: "Le début est lent mais ça vaut le coup.".to_string(),
            date: datetime!(2024-03-14 09:05 UTC),
        },
    ]
}

/// Reader the session starts with before `/me` answers.
pub fn user() -> User {
    User {
        id: "u-1".into(),
        name: "Aminata Bamba".to_string(),
        avatar: "https://img.plume.example/avatars/u-1.jpg".to_string(),
        coins: 50,
        books_written: 2,
    }
}

pub fn authors() -> Vec<Author> {
    vec![
        Author {
            id: "a-1".into(),
            name: "Awa Koné".to_string(),
            avatar: "https://img.plume.example/avatars/a-1.jpg".to_string(),
            bio: "Ancienne journaliste, elle écrit des polars urbains.".to_string(),
            total_books: 2,
            total_reads: 184_000,
            top_book: Some("b-4".into()),
        },
        Author {
            id: "a-2".into(),
            name: "Fatou Diop".to_string(),
            avatar: "https://img.plume.example/avatars/a-2.jpg".to_string(),
            bio: "Reine de la romance sénégalaise.".to_string(),
            total_books: 2,
            total_reads: 251_000,
            top_book: Some("b-6".into()),
        },
        Author {
            id: "a-3".into(),
            name: "Moussa Traoré".to_string(),
            avatar: "https://img.plume.example/avatars/a-3.jpg".to_string(),
            bio: "Conteur, il mêle traditions orales et drames familiaux.".to_string(),
            total_books: 2,
            total_reads: 97_000,
            top_book: Some("b-3".into()),
        },
    ]
}

pub fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            id: "h-1".to_string(),
            image: "https://img.plume.example/hero/1.jpg".to_string(),
            title: "Des histoires qui vous ressemblent".to_string(),
            description: "Des milliers de récits écrits par des auteurs africains.".to_string(),
            cta_text: "Découvrir".to_string(),
        },
        HeroSlide {
            id: "h-2".to_string(),
            image: "https://img.plume.example/hero/2.jpg".to_string(),
            title: "Les premiers chapitres sont offerts".to_string(),
            description: "Commencez gratuitement, continuez avec vos pièces.".to_string(),
            cta_text: "Lire maintenant".to_string(),
        },
        HeroSlide {
            id: "h-3".to_string(),
            image: "https://img.plume.example/hero/3.jpg".to_string(),
            title: "Devenez auteur".to_string(),
            description: "Publiez vos histoires et trouvez vos lecteurs.".to_string(),
            cta_text: "Commencer à écrire".to_string(),
        },
    ]
}

pub fn categories() -> Vec<CategoryChip> {
    [
        ("romance", Genre::Romance, "💕"),
        ("thriller", Genre::Thriller, "🔪"),
        ("mystere", Genre::Mystere, "🔍"),
        ("trahison", Genre::Trahison, "🗡️"),
        ("fantastique", Genre::Fantastique, "✨"),
        ("drame", Genre::Drame, "🎭"),
        ("aventure", Genre::Aventure, "🧭"),
    ]
    .into_iter()
    .map(|(id, name, icon)| CategoryChip {
        id: id.to_string(),
        name,
        icon: Some(icon.to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_book_is_valid() {
        for book in books() {
            book.validate().unwrap();
            let locked = book.locked_chapters().count();
            assert_eq!(book.is_paid, locked > 0, "{}", book.id);
            assert_eq!(
                book.chapters.len() - locked,
                book.free_chapters_count as usize
            );
        }
    }

    #[test]
    fn locked_chapters_cost_coins_and_free_ones_do_not() {
        for chapter in books().iter().flat_map(|book| book.chapters.iter()) {
            assert_eq!(chapter.coin_cost > 0, chapter.is_paid, "{}", chapter.id);
        }
    }

    #[test]
    fn author_top_books_exist() {
        let books = books();
        for author in authors() {
            let top = author.top_book.unwrap();
            let book = books.iter().find(|book| book.id == top).unwrap();
            assert_eq!(book.author_id, author.id);
        }
    }

    #[test]
    fn seed_reader_can_afford_a_premium_chapter() {
        assert!(user().coins >= PREMIUM_COST);
    }
}
