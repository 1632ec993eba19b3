use std::marker::PhantomData;

use cdr::{CdrLe, Infinite};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum MsgError {
    #[error("failed to encode CDR payload: {0}")]
    Encode(#[source] cdr::Error),
    #[error("failed to decode CDR payload: {0}")]
    Decode(#[source] cdr::Error),
}

pub trait ZSerializer {
    type Input<'a>
    where
        Self: 'a;
    fn serialize(input: Self::Input<'_>) -> Result<Vec<u8>, MsgError>;
}

pub trait ZDeserializer {
    type Input<'a>;
    type Output;
    fn deserialize(input: Self::Input<'_>) -> Result<Self::Output, MsgError>;
}

pub trait ZMessage: Sized {
    type Serdes: for<'a> ZSerializer<Input<'a> = &'a Self> + ZDeserializer;

    fn serialize(&self) -> Result<Vec<u8>, MsgError> {
        Self::Serdes::serialize(self)
    }

    fn deserialize(
        input: <Self::Serdes as ZDeserializer>::Input<'_>,
    ) -> Result<Self, MsgError>
    where
        Self::Serdes: ZDeserializer<Output = Self>,
    {
        Self::Serdes::deserialize(input)
    }
}

// Every serde message travels as CDR
impl<T> ZMessage for T
where
    T: Serialize + for<'a> Deserialize<'a> + 'static,
{
    type Serdes = CdrSerdes<T>;
}

/// Little-endian CDR with the 4-byte encapsulation header, as ROS 2 sends it.
pub struct CdrSerdes<T>(PhantomData<T>);

impl<T> ZSerializer for CdrSerdes<T>
where
    T: Serialize,
{
    type Input<'a>
        = &'a T
    where
        T: 'a;

    fn serialize(input: &T) -> Result<Vec<u8>, MsgError> {
        cdr::serialize::<_, _, CdrLe>(input, Infinite).map_err(MsgError::Encode)
    }
}

impl<T> ZDeserializer for CdrSerdes<T>
where
    for<'a> T: Deserialize<'a>,
{
    type Input<'b> = &'b [u8];
    type Output = T;

    fn deserialize(input: &[u8]) -> Result<T, MsgError> {
        cdr::deserialize::<T>(input).map_err(MsgError::Decode)
    }
}
