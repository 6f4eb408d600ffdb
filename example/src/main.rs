use anyhow::Result;
use formdata::{Encoder, Part};
use formdata_serde::File;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Serialize)]
enum Species {
    PrionailurusViverrinus,
}

#[derive(Serialize)]
struct Registration {
    name: String,
    species: Species,
    age: u32,
    address: Address,
    nicknames: Vec<String>,
    referrer: Option<String>,
    photo: File,
    #[serde(with = "serde_bytes")]
    pawprint: Vec<u8>,
}

fn main() -> Result<()> {
    let registration = Registration {
        name: "Jessica".to_owned(),
        species: Species::PrionailurusViverrinus,
        age: 4,
        address: Address {
            street: "Am Teich 1".to_owned(),
            city: "Kiel".to_owned(),
        },
        nicknames: vec!["Jessi".to_owned(), "Fischkatze".to_owned()],
        referrer: None,
        photo: File::new(b"\x89PNG\r\n\x1a\n".to_vec())
            .with_content_type("image/png")
            .with_filename("jessica.png"),
        pawprint: vec![0x00, 0x11, 0x22],
    };
    // Bodies can contain arbitrary bytes, so the message goes to stdout unmodified instead of
    // through a String.
    let body = formdata_serde::to_bytes(&registration, "d74593dced54058b")?;
    std::io::stdout().write_all(&body)?;

    // Parts can also be framed by hand, without going through serde.
    let parts = [Part::text("note", "hand-built part")];
    let mut raw = Vec::new();
    Encoder::encode(&parts, "d74593dced54058b", &mut raw)?;
    std::io::stdout().write_all(&raw)?;
    Ok(())
}
