//! Folds for the two document collections.

use beast_model::{
    Embedded, Film, FilmCharacter, FilmId, FilmSummary, Localized, Media, Person,
    PersonCharacter, PersonKey, PersonSummary, Production,
};
use beast_transform::{FilmField, FilmHead, FilmRecord, PersonField, PersonHead, PersonRecord};

use crate::aggregate::{First, Fold, Nested, ValueSet};

#[derive(Debug, Default)]
pub struct FilmFold {
    head: First<FilmHead>,
    media: First<Media>,
    synopsis: First<Localized>,
    genre: ValueSet<String>,
    production: ValueSet<Production>,
    tags: ValueSet<String>,
    director: Nested<Embedded<PersonSummary>>,
    character: Nested<FilmCharacter>,
}

impl Fold for FilmFold {
    type Record = FilmRecord;
    type Key = FilmId;
    type Output = Film;

    const COLLECTION: &'static str = "films";

    fn key(record: &FilmRecord) -> &FilmId {
        &record.film
    }

    fn absorb(&mut self, record: FilmRecord) {
        match record.field {
            FilmField::Head(head) => self.head.offer(head),
            FilmField::Director(person) => self.director.insert(Embedded::stub(person)),
            FilmField::Genre(genre) => self.genre.insert(genre),
            FilmField::Production(production) => self.production.insert(production),
            FilmField::Tag(tag) => self.tags.insert(tag),
            FilmField::Media(media) => self.media.offer(media),
            FilmField::Synopsis(synopsis) => self.synopsis.offer(synopsis),
            FilmField::Character(character) => self.character.insert(character),
        }
    }

    fn conflicts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("head", self.head.conflicts()),
            ("media", self.media.conflicts()),
            ("synopsis", self.synopsis.conflicts()),
            ("character", self.character.conflicts()),
        ]
    }

    fn finish(self, id: FilmId) -> Option<Film> {
        let FilmHead {
            slug,
            title,
            film_type,
            release,
        } = self.head.into_inner()?;
        Some(Film {
            id,
            slug,
            title,
            film_type,
            release,
            production: self.production.into_vec(),
            media: self.media.into_inner(),
            genre: self.genre.into_vec(),
            tags: self.tags.into_vec(),
            director: self.director.into_vec(),
            character: self.character.into_vec(),
            synopsis: self.synopsis.into_inner(),
        })
    }
}

#[derive(Debug, Default)]
pub struct PersonFold {
    head: First<PersonHead>,
    nationality: ValueSet<String>,
    characters: Nested<PersonCharacter>,
    directed: Nested<Embedded<FilmSummary>>,
}

impl Fold for PersonFold {
    type Record = PersonRecord;
    type Key = PersonKey;
    type Output = Person;

    const COLLECTION: &'static str = "biographies";

    fn key(record: &PersonRecord) -> &PersonKey {
        &record.person
    }

    fn absorb(&mut self, record: PersonRecord) {
        match record.field {
            PersonField::Head(head) => self.head.offer(head),
            PersonField::Nationality(nationality) => self.nationality.insert(nationality),
            PersonField::Character(character) => self.characters.insert(character),
            PersonField::Directed(film) => self.directed.insert(Embedded::stub(film)),
        }
    }

    fn conflicts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("head", self.head.conflicts()),
            ("characters", self.characters.conflicts()),
        ]
    }

    fn finish(self, id: PersonKey) -> Option<Person> {
        let PersonHead {
            name,
            slug,
            birth_year,
            death_year,
            gender,
        } = self.head.into_inner()?;
        Some(Person {
            id,
            slug,
            name,
            birth_year,
            death_year,
            gender,
            nationality: self.nationality.into_vec(),
            characters: self.characters.into_vec(),
            directed: self.directed.into_vec(),
        })
    }
}
