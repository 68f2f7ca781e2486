use num::Num;
use serde::{de, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

use super::SpVec;

impl<N> Serialize for SpVec<N>
where
    N: Num + Copy + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // fields: len, inds, vals
        let mut state = serializer.serialize_struct("SpVec", 3)?;
        state.serialize_field("len", &(self.len as u64))?;
        state.serialize_field("inds", &self.inds)?;
        state.serialize_field("vals", &self.vals)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SpVec<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SpVecData<N> {
            len: u64,
            inds: Vec<u32>,
            vals: Vec<N>,
        }

        let data = SpVecData::<N>::deserialize(deserializer)?;
        // reject anything that breaks the sorted/in-range layout
        SpVec::from_sorted_parts(data.len as usize, data.inds, data.vals)
            .ok_or_else(|| de::Error::custom("SpVec entries must be sorted, unique and within len"))
    }
}
