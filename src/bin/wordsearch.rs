//! # wordsearch
//!
//! Loads a dictionary of words and counts their occurrences in a document.
//!
//! ## Usage
//!
//! ```bash
//! wordsearch -dict words.txt -doc document.txt
//! ```
//!
//! Each dictionary line becomes one key with a zero counter; the document
//! is sanitized, lowercased, and tokenized line by line, and every token
//! that matches a dictionary word bumps its counter. Counts are printed as
//! `word count` lines at exit.

use eyre::{bail, Result, WrapErr};

use bytepool::{ByteBuf, LineReader, MemoryPool, RecordTable};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_usage(cmd: &str) {
    eprintln!("{cmd} -dict <dictionary of words> -doc <document file to search>");
}

/// Value of the flag named `name`, if present with a following argument.
fn get_arg<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let dict_path = get_arg(&args, "-dict");
    let doc_path = get_arg(&args, "-doc");

    let (dict_path, doc_path) = match (dict_path, doc_path) {
        (Some(dict), Some(doc)) => (dict.to_owned(), doc.to_owned()),
        (dict, doc) => {
            if dict.is_none() {
                eprintln!("Missing required flag -dict");
            }
            if doc.is_none() {
                eprintln!("Missing required flag -doc");
            }
            print_usage(&args[0]);
            bail!("missing required arguments");
        }
    };

    let pool = MemoryPool::new();

    let mut dict = load_dictionary(&pool, &dict_path)
        .wrap_err_with(|| format!("unable to load dictionary {dict_path}"))?;
    if dict.entry_count() == 0 {
        bail!("dictionary {dict_path} contains no words");
    }

    count_words(&pool, &mut dict, &doc_path)
        .wrap_err_with(|| format!("unable to scan document {doc_path}"))?;

    report(&dict)
}

/// Loads one sanitized, lowercased word per line, each with an 8-byte
/// little-endian zero counter.
fn load_dictionary(pool: &MemoryPool, path: &str) -> Result<RecordTable> {
    let mut reader = LineReader::open_in(pool, path)?;
    let mut table = RecordTable::new_in(pool);

    let zero = ByteBuf::from_slice_in(pool, &0u64.to_le_bytes())?;
    let mut line = ByteBuf::new_in(pool);

    while reader.read_line(&mut line, b'\n')? {
        line.sanitize_text();
        line.make_ascii_lowercase();
        if line.is_empty() {
            continue;
        }
        table.add(&line, &zero)?;
    }
    Ok(table)
}

/// Streams the document, bumping the counter of every token that matches a
/// dictionary word.
fn count_words(pool: &MemoryPool, dict: &mut RecordTable, path: &str) -> Result<()> {
    let mut reader = LineReader::open_in(pool, path)?;
    let mut line = ByteBuf::new_in(pool);

    while reader.read_line(&mut line, b'\n')? {
        line.sanitize_text();
        line.make_ascii_lowercase();

        let tokens = line.split(b' ')?;
        for token in &tokens {
            if let Some(counter) = dict.get_mut(token) {
                bump(counter);
            }
        }
    }
    Ok(())
}

fn bump(counter: &mut ByteBuf) {
    if counter.len() != 8 {
        return;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(counter.as_bytes());
    let next = u64::from_le_bytes(bytes).wrapping_add(1);
    counter.as_bytes_mut().copy_from_slice(&next.to_le_bytes());
}

fn report(dict: &RecordTable) -> Result<()> {
    for (word, counter) in dict.iter() {
        if counter.len() != 8 {
            continue;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(counter.as_bytes());
        let count = u64::from_le_bytes(bytes);
        println!("{} {count}", String::from_utf8_lossy(word.text()));
    }
    Ok(())
}
