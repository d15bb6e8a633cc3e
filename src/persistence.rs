//! binary persisted-policy format: a PGCOPY-style framed stream, matching
//! the teacher's own `Profile::save`/`Profile::from` layout byte-for-byte
//! in shape even though the field set here is (key, edge, regret, policy)
//! rather than the teacher's (bucket, path, abstraction) triple.

use crate::mccfr::edge::Edge;
use crate::mccfr::policy::PolicyEntry;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const HEADER: &[u8; 11] = b"PGCOPY\n\xFF\r\n\0";
const SENTINEL: u16 = 0xFFFF;

pub fn save(entries: &HashMap<Vec<u8>, PolicyEntry>, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("creating policy file at {}", path.as_ref().display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(HEADER)?;
    w.write_u32::<BigEndian>(0)?; // flags
    w.write_u32::<BigEndian>(0)?; // header extension length

    for (key, entry) in entries {
        for (i, edge) in entry.edges().iter().enumerate() {
            write_record(&mut w, key, *edge, entry.regret_sum()[i], entry.strategy_sum()[i])?;
        }
    }
    w.write_u16::<BigEndian>(SENTINEL)?;
    w.flush()?;
    Ok(())
}

fn write_record<W: Write>(w: &mut W, key: &[u8], edge: Edge, regret: f32, policy: f32) -> anyhow::Result<()> {
    w.write_u16::<BigEndian>(4)?; // field count: key, edge, regret, policy

    w.write_u32::<BigEndian>(key.len() as u32)?;
    w.write_all(key)?;

    w.write_u32::<BigEndian>(1)?;
    w.write_u8(edge.byte())?;

    w.write_u32::<BigEndian>(4)?;
    w.write_f32::<BigEndian>(regret)?;

    w.write_u32::<BigEndian>(4)?;
    w.write_f32::<BigEndian>(policy)?;

    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> anyhow::Result<HashMap<Vec<u8>, PolicyEntry>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening policy file at {}", path.as_ref().display()))?;
    let mut r = BufReader::new(file);

    let mut header = [0u8; 11];
    r.read_exact(&mut header)?;
    anyhow::ensure!(&header == HEADER, "not a recognized policy file: bad header");
    r.read_u32::<BigEndian>()?; // flags, unused
    r.read_u32::<BigEndian>()?; // header extension, unused

    let mut raw: HashMap<Vec<u8>, (Vec<Edge>, Vec<f32>, Vec<f32>)> = HashMap::new();

    loop {
        let field_count = r.read_u16::<BigEndian>()?;
        if field_count == SENTINEL {
            break;
        }
        anyhow::ensure!(field_count == 4, "malformed policy record: unexpected field count");

        let key = read_field(&mut r)?;
        let edge = Edge::from(read_field(&mut r)?[0]);
        let regret = f32::from_be_bytes(read_field(&mut r)?.try_into().unwrap());
        let policy = f32::from_be_bytes(read_field(&mut r)?.try_into().unwrap());

        let slot = raw.entry(key).or_insert_with(|| (Vec::new(), Vec::new(), Vec::new()));
        slot.0.push(edge);
        slot.1.push(regret);
        slot.2.push(policy);
    }

    Ok(raw
        .into_iter()
        .map(|(key, (edges, regret_sum, strategy_sum))| {
            (key, PolicyEntry::from_raw(edges, regret_sum, strategy_sum))
        })
        .collect())
}

fn read_field<R: Read>(r: &mut R) -> anyhow::Result<Vec<u8>> {
    let len = r.read_u32::<BigEndian>()?;
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::edge::Edge;

    #[test]
    fn roundtrips_a_small_policy() {
        let mut entries = HashMap::new();
        let mut entry = PolicyEntry::uniform(Edge::AI.to_vec());
        entry.add_regret(Edge::Raise.index(), 3.0);
        entry.add_strategy_weight(Edge::Call.index(), 7.0);
        entries.insert(b"9Kc".to_vec(), entry);

        let dir = std::env::temp_dir().join("abstracted-holdem-cfr-persistence-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("policy.bin");

        save(&entries, &path).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 1);
        let entry = loaded.get(&b"9Kc".to_vec()).unwrap();
        assert_eq!(entry.regret_sum()[Edge::Raise.index()], 3.0);
        assert_eq!(entry.strategy_sum()[Edge::Call.index()], 7.0);
    }
}
