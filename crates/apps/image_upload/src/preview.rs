//! Preview generation for an accepted batch.

use futures::stream::{FuturesUnordered, StreamExt};
use platform_host::{CandidateFile, ImageDecoder};

/// Decodes every file of `files` concurrently and returns the previews in input order.
///
/// Decodes may finish in any order; each result lands in the slot of its file. Every decode
/// runs to completion and the previews are returned only once all of them have succeeded.
///
/// # Errors
///
/// Returns the first failure (in input order) prefixed with the file name.
pub async fn generate_previews(
    decoder: &dyn ImageDecoder,
    files: &[CandidateFile],
) -> Result<Vec<String>, String> {
    let mut slots: Vec<Option<Result<String, String>>> = vec![None; files.len()];
    let mut pending = files
        .iter()
        .enumerate()
        .map(|(index, file)| async move { (index, decoder.decode(file).await) })
        .collect::<FuturesUnordered<_>>();

    while let Some((index, decoded)) = pending.next().await {
        slots[index] = Some(decoded);
    }

    files
        .iter()
        .zip(slots)
        .map(|(file, slot)| match slot {
            Some(Ok(uri)) => Ok(uri),
            Some(Err(err)) => Err(format!("{}: {err}", file.name)),
            None => Err(format!("{}: preview was never produced", file.name)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        task::LocalSpawnExt,
    };
    use platform_host::{DataUrlImageDecoder, ImageDecodeFuture};

    use super::*;

    /// Decoder whose results are released manually, in whatever order the test chooses.
    #[derive(Default)]
    struct GatedDecoder {
        gates: RefCell<HashMap<String, oneshot::Receiver<Result<String, String>>>>,
    }

    impl GatedDecoder {
        fn gate(&self, name: &str) -> oneshot::Sender<Result<String, String>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(name.to_string(), rx);
            tx
        }
    }

    impl ImageDecoder for GatedDecoder {
        fn decode<'a>(
            &'a self,
            file: &'a CandidateFile,
        ) -> ImageDecodeFuture<'a, Result<String, String>> {
            let gate = self.gates.borrow_mut().remove(&file.name);
            Box::pin(async move {
                match gate {
                    Some(rx) => rx.await.unwrap_or_else(|_| Err("gate dropped".to_string())),
                    None => Err("no gate".to_string()),
                }
            })
        }
    }

    fn png(name: &str) -> CandidateFile {
        CandidateFile::new(name, "image/png", name.as_bytes().to_vec())
    }

    #[test]
    fn previews_follow_input_order_when_decodes_finish_out_of_order() {
        let decoder = std::rc::Rc::new(GatedDecoder::default());
        let files = vec![png("a.png"), png("b.png"), png("c.png")];
        let a = decoder.gate("a.png");
        let b = decoder.gate("b.png");
        let c = decoder.gate("c.png");

        let result = std::rc::Rc::new(RefCell::new(None));
        let mut pool = LocalPool::new();
        {
            let decoder = decoder.clone();
            let result = result.clone();
            pool.spawner()
                .spawn_local(async move {
                    let previews = generate_previews(decoder.as_ref(), &files).await;
                    *result.borrow_mut() = Some(previews);
                })
                .expect("spawn");
        }

        pool.run_until_stalled();
        c.send(Ok("uri-c".to_string())).expect("send c");
        pool.run_until_stalled();
        assert!(result.borrow().is_none(), "published before all decodes finished");
        a.send(Ok("uri-a".to_string())).expect("send a");
        b.send(Ok("uri-b".to_string())).expect("send b");
        pool.run_until_stalled();

        assert_eq!(
            result.borrow_mut().take().expect("finished"),
            Ok(vec![
                "uri-a".to_string(),
                "uri-b".to_string(),
                "uri-c".to_string()
            ])
        );
    }

    #[test]
    fn one_failed_decode_fails_the_batch_with_the_file_name() {
        let decoder = GatedDecoder::default();
        let files = vec![png("a.png"), png("b.png")];
        decoder
            .gate("a.png")
            .send(Ok("uri-a".to_string()))
            .expect("send a");
        decoder
            .gate("b.png")
            .send(Err("unreadable".to_string()))
            .expect("send b");

        let err = block_on(generate_previews(&decoder, &files)).expect_err("b fails");
        assert_eq!(err, "b.png: unreadable");
    }

    #[test]
    fn data_url_previews_embed_the_declared_type() {
        let files = vec![CandidateFile::new("a.png", "image/png", b"hello".to_vec())];
        let previews = block_on(generate_previews(&DataUrlImageDecoder, &files)).expect("decode");
        assert_eq!(previews, vec!["data:image/png;base64,aGVsbG8=".to_string()]);
    }

    #[test]
    fn empty_batch_has_no_previews() {
        let previews = block_on(generate_previews(&DataUrlImageDecoder, &[])).expect("decode");
        assert!(previews.is_empty());
    }
}
