use bytes::BytesMut;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use http::StatusCode;
use raw_http::codec::{RequestDecoder, ResponseEncoder};
use raw_http::encoding::ContentEncoding;
use raw_http::protocol::{Response, ResponseOptions, RouteResult};
use std::hint::black_box;
use tokio_util::codec::{Decoder, Encoder};

const SMALL_REQUEST: &str = "GET /user-agent HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: curl/8.4.0\r\nAccept: */*\r\n\r\n";

const LARGE_REQUEST: &str = "POST /files/report.bin HTTP/1.1\r\n\
    Host: localhost:4221\r\n\
    Connection: keep-alive\r\n\
    Cache-Control: max-age=0\r\n\
    User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36\r\n\
    Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8\r\n\
    Accept-Encoding: gzip, deflate, br\r\n\
    Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7\r\n\
    Content-Type: application/octet-stream\r\n\
    Content-Length: 64\r\n\
    \r\n\
    0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

fn benchmark_request_decoder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("request_decoder");

    for (name, content) in [("small_request", SMALL_REQUEST), ("large_request", LARGE_REQUEST)] {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), content, |b, content| {
            let mut request_decoder = RequestDecoder::new();
            b.iter_batched_ref(
                || BytesMut::from(content),
                |bytes_mut| {
                    let message = request_decoder.decode(bytes_mut).expect("input should be a valid request").unwrap();
                    black_box(message);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_response_encoder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("response_encoder");
    let body = "a".repeat(4096);

    for (name, encoding) in [("identity", None), ("gzip", Some(ContentEncoding::Gzip))] {
        group.bench_function(name, |b| {
            let mut encoder = ResponseEncoder::new();
            b.iter_batched_ref(
                || {
                    let result = RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, body.clone());
                    (Response::new(result, ResponseOptions::new(encoding, false)), BytesMut::new())
                },
                |(response, dst)| {
                    encoder.encode(response.clone(), dst).expect("response should encode");
                    black_box(dst);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(codec, benchmark_request_decoder, benchmark_response_encoder);
criterion_main!(codec);
