use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EncoderError {
    #[snafu(display("invalid encoder configuration: {reason}"))]
    InvalidConfig { reason: &'static str },
    #[snafu(display("codec initialization failed (code = {code})"))]
    CodecInit { code: i32 },
    #[snafu(display("packet is full ({capacity} frames), drain it before encoding more"))]
    Overflow { capacity: usize },
    #[snafu(display("frame has {actual} samples, expected {expected}"))]
    InvalidFrameLength { expected: usize, actual: usize },
    #[snafu(display("codec encoding failed (code = {code})"))]
    CodecEncode { code: i32 },
    #[snafu(display("codec wrote {len} bytes into a {capacity} byte buffer"))]
    PayloadTooLarge { len: usize, capacity: usize },
    #[snafu(display("no encoded packet is ready"))]
    Underflow,
    #[snafu(display("codec control request failed (code = {code})"))]
    CodecControl { code: i32 },
    #[snafu(display("encoder has been released"))]
    Released,
}

pub(crate) type Result<T> = core::result::Result<T, EncoderError>;
